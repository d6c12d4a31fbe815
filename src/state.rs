use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::users::repo::PgUserRepo;
use crate::users::services::UserService;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub users: UserService,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = PgPoolOptions::new()
            .max_connections(config.db.max_connections)
            .min_connections(config.db.min_connections)
            .acquire_timeout(Duration::from_secs(config.db.acquire_timeout_secs))
            .max_lifetime(Duration::from_secs(config.db.max_lifetime_secs))
            .connect(&config.db.url)
            .await
            .context("connect to database")?;

        Self::from_parts(db, config)
    }

    pub fn from_parts(db: PgPool, config: Arc<AppConfig>) -> anyhow::Result<Self> {
        let repo = PgUserRepo::new(db.clone(), &config.db.schema)?;
        let users = UserService::new(Arc::new(repo), config.argon2_time_cost);
        Ok(Self { db, config, users })
    }
}
