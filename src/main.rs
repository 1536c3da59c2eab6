use std::env;
use std::sync::Arc;
use axum::Router;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use xpboard::core::{AppState, LeaderboardConfig};
use xpboard::database::init_user_store;
use xpboard::router::init_router;
use xpboard::stats::StatsCatalog;
use xpboard::welcome::welcome;

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    dotenv().ok();
    let run_mode = env::var("XPBOARD_MODE").unwrap_or_else(|_| "development".into());
    let config = LeaderboardConfig::new_config(&run_mode).unwrap_or_else(|err| panic!("Missing needed env: {}", err));

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)))
        .init();
    welcome(&run_mode);

    //exit application if the store is not reachable
    let user_store = init_user_store(&config).await.unwrap_or_else(|err| panic!("Failed to open the user store: {}", err));
    let stats = StatsCatalog::load(&config.stats.stats_path).await.unwrap_or_else(|err| panic!("{}", err));

    let url = format!("{}:{}", config.app_url, config.app_port);
    let app_state = AppState {
        env: config,
        user_store,
        stats: Arc::new(stats),
    };
    let app: Router = init_router(app_state);

    let listener = TcpListener::bind(&url).await.unwrap_or_else(|err| panic!("Unable to bind {url}: {err}"));
    info!("xpboard is listening on: {url}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap_or_else(|err| panic!("Server error: {}", err));
    info!("Stopping xpboard...");
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Unable to listen for the shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
}
