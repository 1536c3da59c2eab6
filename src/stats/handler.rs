use std::sync::Arc;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use crate::core::AppState;
use crate::errors::AppResponse;
use crate::model::{WeekOption, WeeklyStats};
use crate::stats::stats_service::StatsService;

#[derive(Deserialize, Debug)]
pub struct StatsQueryParam {
    pub week: Option<String>,
}

pub async fn handle_get_week_options(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<WeekOption>> {
    Json(state.stats.week_options())
}

pub async fn handle_get_weekly_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatsQueryParam>
) -> AppResponse<Json<WeeklyStats>> {
    let stats = StatsService::get_week(&state.stats, params.week.as_deref())?;
    Ok(Json(stats))
}
