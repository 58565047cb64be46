use std::sync::Arc;

use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::database::memory::MemoryStore;
use crate::database::postgres::PgStore;
use crate::database::store::{Store, StoreError};

/// Tables are created on startup when missing. Each statement runs separately
/// because the extended query protocol rejects multi-statement strings.
const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS users (
        id            UUID PRIMARY KEY,
        name          TEXT,
        username      TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        created_at    TIMESTAMPTZ NOT NULL DEFAULT now()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS movies (
        id           UUID PRIMARY KEY,
        title        TEXT NOT NULL UNIQUE,
        release_date DATE NOT NULL,
        genre        TEXT NOT NULL,
        actors       TEXT[] NOT NULL,
        created_at   TIMESTAMPTZ NOT NULL DEFAULT now()
    )"#,
];

/// Builds the single long-lived store handle for the process
pub struct DatabaseManager;

impl DatabaseManager {
    /// Connects to Postgres when a URL is configured, otherwise falls back to memory.
    pub async fn open(config: &DatabaseConfig) -> Result<Arc<dyn Store>, StoreError> {
        match &config.url {
            Some(url) => {
                let pool = Self::connect(url, config.max_connections).await?;
                Self::bootstrap(&pool).await?;
                Ok(Arc::new(PgStore::new(pool)))
            }
            None => {
                warn!("DATABASE_URL not set; using the in-memory store (data is lost on exit)");
                Ok(Arc::new(MemoryStore::new()))
            }
        }
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<PgPool, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        info!("Created database pool (max_connections={})", max_connections);
        Ok(pool)
    }

    pub async fn bootstrap(pool: &PgPool) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(pool).await?;
        }
        info!("Database schema ready");
        Ok(())
    }
}
