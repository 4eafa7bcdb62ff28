//! # TeamBeat Common
//!
//! Side-effect-free utilities shared across the workspace.
//!
//! This crate contains:
//! - Timezone-aware civil/UTC conversions ([`time::zone`])
//! - Clock abstractions for deterministic tests ([`testing::time`])
//!
//! ## Architecture
//! - No dependencies on other TeamBeat crates
//! - No I/O, no logging side effects
//! - Pure, testable helpers only

pub mod testing;
pub mod time;
