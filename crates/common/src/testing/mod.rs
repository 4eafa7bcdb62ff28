//! Test support utilities
//!
//! Clock abstractions live here so production code and tests share the same
//! notion of "now".

pub mod time;

pub use time::{Clock, MockClock, SystemClock};
