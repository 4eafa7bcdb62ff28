//! Database layer: SQLite-backed implementations of the store ports.

pub mod occurrence_repository;
pub mod pool;
pub mod team_config_repository;

pub use occurrence_repository::SqliteOccurrenceRepository;
pub use pool::{create_in_memory_pool, create_pool, SqliteConnection, SqlitePool};
pub use team_config_repository::SqliteTeamConfigRepository;
