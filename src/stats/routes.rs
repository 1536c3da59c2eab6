use std::sync::Arc;
use axum::Router;
use axum::routing::get;
use crate::core::AppState;
use crate::stats::handler::{handle_get_week_options, handle_get_weekly_stats};

pub fn create_stats_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/stats", get(handle_get_weekly_stats))
        .route("/api/stats/weeks", get(handle_get_week_options))
}
