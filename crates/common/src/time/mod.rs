//! Time utilities and abstractions
//!
//! This module provides the time handling primitives the scheduler is built
//! on:
//! - **Clock abstractions**: real and mock wall-clock time for testing
//!   (re-exported from [`crate::testing`])
//! - **[`zone`]**: DST-aware conversions between civil (wall-clock) time and
//!   UTC, plus local calendar-date keys
//!
//! ## Usage
//!
//! ```rust
//! use chrono::{NaiveDate, NaiveTime};
//! use chrono_tz::Tz;
//! use teambeat_common::time::zone::civil_to_utc;
//!
//! let tz: Tz = "Europe/Berlin".parse().unwrap();
//! let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
//! let time = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
//!
//! // 09:00 Berlin summer time is 07:00 UTC
//! let utc = civil_to_utc(date, time, tz);
//! assert_eq!(utc.to_rfc3339(), "2024-06-03T07:00:00+00:00");
//! ```

pub mod zone;

// Re-export commonly used items
pub use zone::{
    civil_to_utc, local_date, local_date_key, render_local, render_utc, start_of_local_day,
};

// Re-export Clock abstractions from testing module
pub use crate::testing::time::{Clock, MockClock, SystemClock};
