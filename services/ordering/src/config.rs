use serde::Deserialize;

use pizza_core::config::Config;

/// Ordering data layer configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderingConfig {
    /// Database connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// Pool size (default 10). Env var: `DATABASE_MAX_CONNECTIONS`.
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
    /// Log every statement through sqlx. Env var: `DATABASE_SQLX_LOGGING`.
    #[serde(default)]
    pub database_sqlx_logging: bool,
    /// Roles created by `ordering-init`, comma separated. Env var: `SEED_ROLES`.
    #[serde(default = "default_seed_roles")]
    pub seed_roles: Vec<String>,
}

fn default_max_connections() -> u32 {
    10
}

fn default_seed_roles() -> Vec<String> {
    vec!["Admin".to_owned(), "User".to_owned()]
}

impl Config for OrderingConfig {}
