//! Connection handling and schema for the Postgres pet store.

use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::DbError;

pub type DbPool = PgPool;

/// A request waiting on a busy pool gives up after this long.
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// The `pets` and `sequences` tables, embedded at build time.
pub static SCHEMA: Migrator = sqlx::migrate!("../../migrations");

/// Open a pool against the pet database.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<DbPool, DbError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await?;
    info!(max_connections, "connected to postgres pet store");
    Ok(pool)
}

/// Apply any pending schema migrations.
pub async fn migrate(pool: &DbPool) -> Result<(), DbError> {
    SCHEMA.run(pool).await?;
    info!(migrations = SCHEMA.iter().count(), "pet schema is up to date");
    Ok(())
}
