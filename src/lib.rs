pub mod client;
pub mod core;
pub mod database;
pub mod errors;
pub mod leaderboard;
pub mod model;
pub mod router;
pub mod stats;
pub mod welcome;
