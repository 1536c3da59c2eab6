use std::sync::Arc;
use crate::core::LeaderboardConfig;
use crate::database::UserStore;
use crate::stats::StatsCatalog;

#[derive(Clone)]
pub struct AppState {
    pub env: LeaderboardConfig,
    pub user_store: Arc<dyn UserStore>,
    pub stats: Arc<StatsCatalog>,
}
