//! Time abstraction for testability
//!
//! Provides a trait-based approach to wall-clock time that allows for
//! deterministic testing without relying on the actual system clock. The
//! scheduler's window clipping and future guards all hinge on "now", so
//! tests pin it to a fixed instant.
//!
//! # Examples
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use teambeat_common::testing::{Clock, MockClock, SystemClock};
//!
//! // Use the system clock in production
//! let clock = SystemClock;
//! let _now = clock.now_utc();
//!
//! // Pin time in tests
//! let fixed = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
//! let mock = MockClock::at(fixed);
//! mock.advance(Duration::hours(2));
//! assert_eq!(mock.now_utc(), fixed + Duration::hours(2));
//! ```

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

/// Trait for wall-clock time to enable testing
pub trait Clock: Send + Sync {
    /// Get the current wall-clock time in UTC
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Real system clock implementation
///
/// Use this in production code.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Mock clock for deterministic testing
///
/// Starts at a chosen instant and only moves when told to. Clones share the
/// same underlying time.
#[derive(Debug, Clone)]
pub struct MockClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl MockClock {
    /// Create a mock clock pinned to the given instant.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now: Arc::new(Mutex::new(now)) }
    }

    /// Move the clock forward (or backward, with a negative duration).
    pub fn advance(&self, duration: Duration) {
        // Test utility: panic on poisoned mutex to fail tests early
        let mut now = self.now.lock().expect("mutex poisoned");
        *now += duration;
    }

    /// Pin the clock to a specific instant.
    pub fn set(&self, instant: DateTime<Utc>) {
        // Test utility: panic on poisoned mutex to fail tests early
        let mut now = self.now.lock().expect("mutex poisoned");
        *now = instant;
    }
}

impl Clock for MockClock {
    fn now_utc(&self) -> DateTime<Utc> {
        // Test utility: panic on poisoned mutex to fail tests early
        *self.now.lock().expect("mutex poisoned")
    }
}
