use std::path::PathBuf;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct LeaderboardConfig {
    pub app_port: u16,
    pub app_url: String,
    pub log_level: String,
    pub cors_origin: String,
    pub store: StoreConfig,
    pub user_db_config: UserDbConfig,
    pub query: QueryConfig,
    pub stats: StatsConfig,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// JSON array of user documents loaded into the in-memory store.
    pub seed_path: Option<PathBuf>,
    #[serde(default)]
    pub run_migrations: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct UserDbConfig {
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    pub db_user: String,
    pub db_password: String,
    pub max_connections: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct QueryConfig {
    /// Upper bound for every single store call of a request.
    pub store_timeout_ms: u64,
    /// How many global rank counts may run at the same time for one page.
    pub rank_concurrency: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self { store_timeout_ms: 5000, rank_concurrency: 8 }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct StatsConfig {
    pub stats_path: PathBuf,
}

//examples: https://github.com/rust-cli/config-rs/blob/main/examples/hierarchical-env/settings.rs
impl LeaderboardConfig {
    pub fn new_config(mode: &str) -> Result<Self, ConfigError> {
        //layering the different sources, default values first, overwritten by the mode file and env-vars
        let config = Config::builder()
            .add_source(File::with_name("default.config.toml"))
            .add_source(File::with_name(&format!("{mode}.config.toml")).required(false))
            .add_source(Environment::default().separator("__"))
            .build()?;
        config.try_deserialize()
    }
}
