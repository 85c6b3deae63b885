use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

use crate::config::DatabaseConfig;

pub type DbPool = Pool<Postgres>;

/// Establish the Postgres pool for a load run. A run is strictly
/// sequential, so the pool is capped at a single connection.
pub async fn connect(config: &DatabaseConfig) -> Result<DbPool> {
    PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(config.connect_options())
        .await
        .with_context(|| {
            format!(
                "failed to connect to Postgres at {}:{}",
                config.host, config.port
            )
        })
}

/// Connect from a full database URL; used by the database-gated tests.
pub async fn connect_url(database_url: &str) -> Result<DbPool> {
    PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await
        .with_context(|| "failed to connect to Postgres")
}
