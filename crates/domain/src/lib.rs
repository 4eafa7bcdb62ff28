//! # TeamBeat Domain
//!
//! Business domain types and models for the occurrence scheduler.
//!
//! This crate contains:
//! - Schedule configuration types (cadence, anchors, meeting time)
//! - Occurrence row and generation result types
//! - Domain error types and Result definitions
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other TeamBeat crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
