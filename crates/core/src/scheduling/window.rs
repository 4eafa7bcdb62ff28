//! Window clipping against "now"
//!
//! Regeneration runs on a rolling window and must never reach into
//! already-past local time: a purely past window is dropped, and a window
//! straddling "now" starts at local midnight of the current day so a mid-day
//! trigger never backfills a "missed" occurrence from earlier the same day.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use teambeat_common::time::zone::start_of_local_day;
use teambeat_domain::GenerationWindow;

/// Adjust the window's start boundary against `now`.
///
/// Returns `None` when the window lies entirely in the past.
pub fn clip(window: GenerationWindow, now: DateTime<Utc>, tz: Tz) -> Option<GenerationWindow> {
    if window.to < now {
        return None;
    }
    if window.from < now {
        return Some(GenerationWindow::new(start_of_local_day(now, tz), window.to));
    }
    Some(window)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn berlin() -> Tz {
        "Europe/Berlin".parse().unwrap()
    }

    #[test]
    fn past_window_is_dropped() {
        let from = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 5, 15, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

        assert_eq!(clip(GenerationWindow::new(from, to), now, berlin()), None);
    }

    #[test]
    fn straddling_window_starts_at_local_midnight_today() {
        let from = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap();
        // Mid-day in Berlin on Jun 10 (14:00 local, CEST)
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();

        let clipped = clip(GenerationWindow::new(from, to), now, berlin()).unwrap();

        // Local midnight Jun 10 CEST is 22:00 UTC on Jun 9
        assert_eq!(clipped.from, Utc.with_ymd_and_hms(2024, 6, 9, 22, 0, 0).unwrap());
        assert_eq!(clipped.to, to);
    }

    #[test]
    fn future_window_passes_through_unchanged() {
        let from = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 7, 31, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let window = GenerationWindow::new(from, to);

        assert_eq!(clip(window, now, berlin()), Some(window));
    }
}
