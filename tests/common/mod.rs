#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use async_trait::async_trait;
use axum::Router;
use xpboard::core::{AppState, LeaderboardConfig, QueryConfig, StatsConfig, StoreBackend, StoreConfig, UserDbConfig};
use xpboard::database::{InMemoryUserStore, SortValue, StoreError, UserStore};
use xpboard::model::{SortSpec, UserDocument, UserFilter};
use xpboard::router::init_router;
use xpboard::stats::StatsCatalog;

pub fn test_config() -> LeaderboardConfig {
    LeaderboardConfig {
        app_port: 0,
        app_url: "127.0.0.1".to_string(),
        log_level: "debug".to_string(),
        cors_origin: "http://localhost:3000".to_string(),
        store: StoreConfig { backend: StoreBackend::Memory, seed_path: None, run_migrations: false },
        user_db_config: UserDbConfig {
            db_host: "localhost".to_string(),
            db_port: 5432,
            db_name: "xpboard".to_string(),
            db_user: "xpboard".to_string(),
            db_password: "xpboard".to_string(),
            max_connections: 1,
        },
        query: QueryConfig::default(),
        stats: StatsConfig { stats_path: stats_path() },
    }
}

pub fn stats_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/weekly_stats.json")
}

pub fn user(id: &str, name: &str, xp: i64) -> UserDocument {
    UserDocument {
        id: id.to_string(),
        name: Some(name.to_string()),
        wallet_address: Some(format!("0xwallet{id}")),
        has_streaming_access: Some(false),
        total_experience_points: Some(xp),
        xp_multiplier: Some(1.0),
        tier: Some(1),
        badge_count: Some(2),
    }
}

/// Ten users, `u00` leads with 1000 XP and every next one has 100 XP less.
pub fn ladder() -> Vec<UserDocument> {
    let names = ["Zoe", "Alice", "Bob", "Malia", "Carl", "Dana", "Alina", "Eric", "Fay", "Gus"];
    names.iter().enumerate()
        .map(|(position, name)| user(&format!("u{position:02}"), name, 1000 - 100 * position as i64))
        .collect()
}

pub async fn app_with_store(store: Arc<dyn UserStore>) -> Router {
    let stats = StatsCatalog::load(&stats_path()).await.unwrap();
    init_router(AppState {
        env: test_config(),
        user_store: store,
        stats: Arc::new(stats),
    })
}

pub async fn app(documents: Vec<UserDocument>) -> Router {
    app_with_store(Arc::new(InMemoryUserStore::new(documents))).await
}

/// Store whose every call fails, like a database that went away.
pub struct BrokenStore;

#[async_trait]
impl UserStore for BrokenStore {
    async fn count_users(&self, _filter: &UserFilter) -> Result<u64, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn find_users(&self, _filter: &UserFilter, _sort: SortSpec, _skip: u64, _limit: u64) -> Result<Vec<UserDocument>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn count_ranked_ahead(&self, _sort: SortSpec, _pivot: &SortValue) -> Result<u64, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}
