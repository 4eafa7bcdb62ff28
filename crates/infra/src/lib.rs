//! # TeamBeat Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite implementations of the team configuration and occurrence stores
//! - The fixed organization-timezone resolver
//! - Conversions from infrastructure errors into domain errors
//!
//! ## Architecture
//! - Implements traits defined in `teambeat-core`
//! - Depends on `teambeat-domain` and `teambeat-core`
//! - Contains all "impure" code (I/O, database)

pub mod config;
pub mod database;
pub mod errors;

// Re-export commonly used items
pub use config::FixedOrgTimezoneResolver;
pub use database::{
    create_pool, SqliteOccurrenceRepository, SqlitePool, SqliteTeamConfigRepository,
};
pub use errors::InfraError;
