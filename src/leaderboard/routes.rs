use std::sync::Arc;
use axum::Router;
use axum::routing::get;
use crate::core::AppState;
use crate::leaderboard::handler::handle_get_users;

pub fn create_leaderboard_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users", get(handle_get_users))
}
