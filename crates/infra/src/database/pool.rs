//! SQLite pool helpers
//!
//! Thin wrapper around an r2d2/rusqlite connection pool that converts pool
//! errors into the domain error type and bootstraps the schema on creation.

use std::path::Path;
use std::sync::Arc;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use teambeat_domain::Result as DomainResult;

use crate::errors::InfraError;

/// Connection pool shared by the repositories.
pub type SqlitePool = Pool<SqliteConnectionManager>;

/// A pooled connection.
pub type SqliteConnection = PooledConnection<SqliteConnectionManager>;

/// Create an `Arc<SqlitePool>` for a database file, creating the schema if
/// needed.
pub fn create_pool<P: AsRef<Path>>(path: P) -> DomainResult<Arc<SqlitePool>> {
    let manager = SqliteConnectionManager::file(path.as_ref());
    build_pool(manager, None)
}

/// Create an in-memory pool for tests. Capped at one connection so every
/// caller sees the same database.
pub fn create_in_memory_pool() -> DomainResult<Arc<SqlitePool>> {
    build_pool(SqliteConnectionManager::memory(), Some(1))
}

fn build_pool(
    manager: SqliteConnectionManager,
    max_size: Option<u32>,
) -> DomainResult<Arc<SqlitePool>> {
    let mut builder = Pool::builder();
    if let Some(size) = max_size {
        builder = builder.max_size(size);
    }
    let pool = builder.build(manager).map_err(InfraError::from)?;
    initialize_schema(&pool)?;
    Ok(Arc::new(pool))
}

/// Acquire a connection with domain error semantics.
pub fn get_connection(pool: &SqlitePool) -> DomainResult<SqliteConnection> {
    pool.get().map_err(|err| InfraError::from(err).into())
}

fn initialize_schema(pool: &SqlitePool) -> DomainResult<()> {
    let conn = get_connection(pool)?;
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS team_schedule_configs (
            team_id TEXT PRIMARY KEY,
            organization_id TEXT NOT NULL,
            cadence TEXT NOT NULL,
            meeting_time TEXT NOT NULL,
            anchor_day_of_week INTEGER,
            anchor_week_of_month TEXT,
            anchor_day_of_month INTEGER,
            anchor_month INTEGER
        );

        CREATE TABLE IF NOT EXISTS occurrences (
            id TEXT PRIMARY KEY,
            organization_id TEXT NOT NULL,
            team_id TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT,
            scheduled_ts INTEGER NOT NULL,
            local_date_key TEXT NOT NULL,
            status TEXT NOT NULL,
            meeting_type TEXT NOT NULL,
            agenda TEXT NOT NULL DEFAULT '[]',
            created_at INTEGER NOT NULL,
            UNIQUE(organization_id, team_id, scheduled_ts)
        );

        CREATE INDEX IF NOT EXISTS idx_occurrences_local_day
            ON occurrences(organization_id, team_id, local_date_key);",
    )
    .map_err(InfraError::from)?;
    Ok(())
}
