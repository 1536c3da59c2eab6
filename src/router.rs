use std::sync::Arc;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::Router;
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tower::ServiceBuilder;
use crate::core::AppState;
use crate::leaderboard::routes::create_leaderboard_routes;
use crate::stats::routes::create_stats_routes;

/**
 * Initializing the api routes.
 */
pub fn init_router(app_state: AppState) -> Router {
    let cors = match app_state.env.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new().allow_origin(origin),
        Err(_) => {
            tracing::warn!("Invalid cors origin '{}', cross origin requests are disabled.", app_state.env.cors_origin);
            CorsLayer::new()
        }
    }
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .allow_methods([Method::GET, Method::OPTIONS]);

    let public_routing = Router::new()
        .route("/", get(|| async { "Hello, world! I'm your xpboard. 🏆" }))
        .route("/health", get(|| async { (StatusCode::OK, "Healthy").into_response() }));

    let api_routing = Router::new() //add new routes here
        .merge(create_leaderboard_routes())
        .merge(create_stats_routes())

        //layering bottom to top middleware
        .layer(
            ServiceBuilder::new() //layering top to bottom middleware
                .layer(TraceLayer::new_for_http()) //1
                .layer(cors) //2
        )
        .with_state(Arc::new(app_state));
    public_routing.merge(api_routing)
}
