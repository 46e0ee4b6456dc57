//! Server state
//!
//! [`ServerState`] holds shared references to every service the handlers
//! need. `Clone` is shallow (pool + Arc).

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    /// Embedded database (SQLite via sqlx)
    pub db: DbService,
    /// JWT verification service
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Open the database, run migrations and assemble the state
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Ok(Self {
            config: config.clone(),
            db,
            jwt_service,
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }
}
