use std::env;

/// Without a `DATABASE_URL` the server keeps feedback in memory.
#[derive(Clone, Debug, Default)]
pub struct StorageConfig {
    pub database_url: Option<String>,
    pub max_connections: u32,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
        }
    }
}
