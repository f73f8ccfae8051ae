use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::auth::bootstrap;
use crate::db::repository::menu_item;

/// Server state - shared references handed to every handler
///
/// Cheap to clone: the pool and the JWT service are reference counted.
///
/// | Field | Meaning |
/// |-------|---------|
/// | config | immutable configuration |
/// | pool | SQLite connection pool |
/// | jwt_service | token issue / validation |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            pool,
            jwt_service,
        }
    }

    /// Initialize server state
    ///
    /// 1. work directory structure
    /// 2. database (work_dir/database/canteen.db) + migrations
    /// 3. default menu when the menu is empty
    /// 4. bootstrap manager account when configured
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_path();
        let db = DbService::new(&db_path.to_string_lossy()).await?;

        let seeded = menu_item::seed_default_menu(&db.pool)
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;
        if seeded > 0 {
            tracing::info!(items = seeded, "Seeded default menu");
        }

        if let (Some(id), Some(password)) = (&config.admin_id, &config.admin_password) {
            let created = bootstrap::ensure_manager(&db.pool, id, password)
                .await
                .map_err(|e| ServerError::Database(e.to_string()))?;
            if created {
                tracing::info!(user_id = %id, "Bootstrap manager account created");
            }
        }

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Ok(Self::new(config.clone(), db.pool, jwt_service))
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Business time zone
    pub fn tz(&self) -> chrono_tz::Tz {
        self.config.timezone
    }
}
