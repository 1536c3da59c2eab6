mod config;
mod app_state;

pub use config::{LeaderboardConfig, StoreBackend, StoreConfig, UserDbConfig, QueryConfig, StatsConfig};
pub use app_state::*;
