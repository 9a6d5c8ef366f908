use std::str::FromStr;
use std::time::Duration;

use sea_orm::{DatabaseConnection, SqlxSqliteConnector};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// SeaORM connection, backed by the same pool migrations ran on
    pub db: DatabaseConnection,
    pub config: Config,
}

impl AppState {
    /// Open the database, apply migrations and build the state
    pub async fn new(config: Config) -> Result<Self, AppStateError> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(|e| AppStateError::Sqlite(e.to_string()))?
            .create_if_missing(true)
            .foreign_keys(true);

        // Idle connections are never reaped so in-memory databases survive
        let pool = SqlitePoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await
            .map_err(|e| AppStateError::Sqlite(e.to_string()))?;

        // Run migrations
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppStateError::Migration(e.to_string()))?;

        let db = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool);

        Ok(Self { db, config })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppStateError {
    #[error("SQLite connection error: {0}")]
    Sqlite(String),

    #[error("Migration error: {0}")]
    Migration(String),
}
