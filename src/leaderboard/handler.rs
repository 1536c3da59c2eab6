use std::sync::Arc;
use axum::extract::{Query, State};
use axum::Json;
use crate::core::AppState;
use crate::errors::AppResponse;
use crate::leaderboard::leaderboard_service::LeaderboardService;
use crate::model::{LeaderboardPage, LeaderboardQuery, LeaderboardQueryParams};

pub async fn handle_get_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeaderboardQueryParams>
) -> AppResponse<Json<LeaderboardPage>> {

    let query = LeaderboardQuery::try_from(params)?;
    tracing::debug!(
        limit = query.limit,
        skip = query.skip,
        sort_field = %query.sort.field,
        sort_order = %query.sort.order,
        search = query.search.as_deref().unwrap_or(""),
        "Loading leaderboard page"
    );
    let page = LeaderboardService::query_users(state.user_store.as_ref(), &state.env.query, query).await?;
    Ok(Json(page))
}
