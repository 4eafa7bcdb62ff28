//! Occurrence scheduling
//!
//! The generation pipeline: clip the requested window against "now", expand
//! the team's cadence into candidate instants, then persist each candidate
//! exactly once.

pub mod ports;
pub mod recurrence;
pub mod service;
pub mod window;

pub use service::SchedulingService;
