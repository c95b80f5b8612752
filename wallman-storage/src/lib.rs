mod migration;
mod sql;

pub use migration::Migrator;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{info, instrument};
use wallman_error::{init::InitContextError, storage::StorageError, WMResult};
use wallman_models::settings::Settings;

/// Owns the pooled connection shared by every store
pub struct WMDbManager {
    db_conn: Option<DatabaseConnection>,
}

impl WMDbManager {
    #[inline]
    #[instrument(name = "init-db-manager", skip_all)]
    pub async fn init(settings: &Settings) -> WMResult<Arc<Self>, InitContextError> {
        let db = sql::sqlite::init_db(&settings.db.sqlite).await.map_err(|e| {
            InitContextError::Primitive(format!("Failed to init SQLite database: {e}"))
        })?;
        Self::from_connection(db).await
    }

    /// In-memory database, migrated and seeded
    #[inline]
    pub async fn memory() -> WMResult<Arc<Self>, InitContextError> {
        let db = sql::sqlite::init_memory_db().await.map_err(|e| {
            InitContextError::Primitive(format!("Failed to open in-memory database: {e}"))
        })?;
        Self::from_connection(db).await
    }

    async fn from_connection(db: DatabaseConnection) -> WMResult<Arc<Self>, InitContextError> {
        Migrator::up(&db, None).await.map_err(|e| {
            InitContextError::Primitive(format!("Failed to migrate SQLite database: {e}"))
        })?;

        info!("Database manager initialized successfully");
        Ok(Arc::new(WMDbManager { db_conn: Some(db) }))
    }

    #[inline]
    pub fn get_connection(&self) -> WMResult<DatabaseConnection, StorageError> {
        self.db_conn
            .as_ref()
            .ok_or(StorageError::StorageUnavailable)
            .cloned()
    }

    #[inline]
    #[instrument(name = "db_close", skip_all)]
    pub async fn close(&self) -> WMResult<()> {
        info!("Closing database connections...");
        if let Some(db) = &self.db_conn {
            db.clone().close().await?;
        }
        info!("Database connections closed successfully");
        Ok(())
    }
}
