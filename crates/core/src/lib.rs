//! # TeamBeat Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The recurrence calculator and window clipper (pure functions)
//! - Port/adapter interfaces (traits) for the external stores
//! - The idempotent scheduling service and dry-run preview
//!
//! ## Architecture Principles
//! - Only depends on `teambeat-common` and `teambeat-domain`
//! - No database or platform code
//! - All external collaborators behind traits
//! - Pure, testable business logic

pub mod scheduling;

// Re-export specific items to avoid ambiguity
pub use scheduling::ports::{OccurrenceRepository, OrgTimezoneResolver, TeamConfigRepository};
pub use scheduling::SchedulingService;
