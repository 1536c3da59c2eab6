mod handler;
mod leaderboard_service;
mod rank;
pub mod routes;

pub use leaderboard_service::LeaderboardService;
pub use rank::{compute_global_ranks, RankEntry};
