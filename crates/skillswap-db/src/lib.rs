//! # SkillSwap DB
//!
//! PostgreSQL connection pool and embedded migrations.
//!
//! # Example
//!
//! ```ignore
//! use skillswap_db::{init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(database_url, &storage_config).await?;
//! run_migrations(&pool).await?;
//! ```

use skillswap_config::StorageConfig;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// Connects to PostgreSQL.
///
/// The returned pool is cheaply cloneable and should live in the application
/// state for the lifetime of the process.
pub async fn init_db_pool(
    database_url: &str,
    config: &StorageConfig,
) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(database_url)
        .await?;

    info!(
        max_connections = config.max_connections,
        "Connected to PostgreSQL"
    );

    Ok(pool)
}

/// Applies the migrations embedded from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;
