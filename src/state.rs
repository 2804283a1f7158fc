use std::sync::Arc;

use tracing::{info, warn};

use skillswap_config::{CorsConfig, JwtConfig, StorageConfig};
use skillswap_db::{init_db_pool, run_migrations};

use crate::store::{FeedbackStore, MemoryFeedbackStore, PgFeedbackStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FeedbackStore>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn FeedbackStore>, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            store,
            jwt_config,
            cors_config,
        }
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let storage_config = StorageConfig::from_env();

    let store: Arc<dyn FeedbackStore> = match storage_config.database_url.as_deref() {
        Some(database_url) => {
            let pool = init_db_pool(database_url, &storage_config).await?;
            run_migrations(&pool).await?;
            info!("Using PostgreSQL feedback store");
            Arc::new(PgFeedbackStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set, feedback is kept in memory and lost on restart");
            Arc::new(MemoryFeedbackStore::new())
        }
    };

    Ok(AppState::new(
        store,
        JwtConfig::from_env(),
        CorsConfig::from_env(),
    ))
}
