mod memory_store;
mod user_database;
mod user_store;

use std::sync::Arc;
use log::info;
use crate::core::{LeaderboardConfig, StoreBackend};

pub use memory_store::InMemoryUserStore;
pub use user_database::{UserDatabase, MIGRATOR};
pub use user_store::{SortValue, StoreError, UserStore};

/// Opens the user store selected in the configuration.
pub async fn init_user_store(config: &LeaderboardConfig) -> Result<Arc<dyn UserStore>, StoreError> {
    match config.store.backend {
        StoreBackend::Postgres => {
            let database = UserDatabase::new(&config.user_db_config).await?;
            if config.store.run_migrations {
                database.run_migrations().await
                    .map_err(|err| StoreError::Unavailable(format!("Migration failed: {}", err)))?;
            }
            Ok(Arc::new(database))
        }
        StoreBackend::Memory => {
            let store = match &config.store.seed_path {
                Some(path) => InMemoryUserStore::from_seed_file(path).await?,
                None => InMemoryUserStore::default(),
            };
            info!("Using the in-memory user store with {} users.", store.len());
            Ok(Arc::new(store))
        }
    }
}
