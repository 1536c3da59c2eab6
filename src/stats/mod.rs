mod handler;
mod stats_service;
pub mod routes;

pub use stats_service::{StatsCatalog, StatsLoadError, StatsService};
