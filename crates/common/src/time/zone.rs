//! DST-aware conversions between civil (wall-clock) time and UTC.
//!
//! All scheduling math in the workspace goes through these helpers so that
//! the resolution policy for irregular wall-clock times lives in exactly one
//! place:
//! - an *ambiguous* local time (the repeated hour when clocks fall back)
//!   resolves to the **earlier** UTC instant;
//! - a *skipped* local time (the gap when clocks spring forward) shifts
//!   **forward** to the first valid wall-clock minute after the gap.
//!
//! Both policies keep the resulting instant on the requested calendar day.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Longest DST gap worth probing, in minutes. Real zone data tops out at a
/// few hours (Lord Howe uses 30 minutes, most zones 60).
const MAX_GAP_PROBE_MINUTES: i64 = 4 * 60;

/// Resolve a civil date and time in `tz` to the UTC instant whose local
/// rendering equals the requested components, using the offset in effect on
/// that calendar date.
pub fn civil_to_utc(date: NaiveDate, time: NaiveTime, tz: Tz) -> DateTime<Utc> {
    let local = date.and_time(time);
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earlier, _later) => earlier.with_timezone(&Utc),
        LocalResult::None => first_instant_after_gap(local, tz),
    }
}

/// Walk forward one minute at a time until the wall clock exists again.
fn first_instant_after_gap(local: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    let mut probe = local;
    for _ in 0..MAX_GAP_PROBE_MINUTES {
        probe += Duration::minutes(1);
        match tz.from_local_datetime(&probe) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
                return dt.with_timezone(&Utc);
            }
            LocalResult::None => {}
        }
    }
    // Pathological zone data; interpret the components as UTC rather than
    // loop further.
    Utc.from_utc_datetime(&local)
}

/// Calendar date of an instant rendered in `tz`.
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Local calendar date of an instant as a `YYYY-MM-DD` key.
///
/// Used purely as a grouping/idempotency key: two instants that land on the
/// same local day share a key even when their UTC offsets differ.
pub fn local_date_key(instant: DateTime<Utc>, tz: Tz) -> String {
    local_date(instant, tz).format("%Y-%m-%d").to_string()
}

/// UTC instant of 00:00 local time on the local calendar date containing
/// `instant`.
pub fn start_of_local_day(instant: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    civil_to_utc(local_date(instant, tz), NaiveTime::MIN, tz)
}

/// Render an instant as an ISO-8601 UTC string with `Z` suffix.
pub fn render_utc(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Render an instant as an ISO-8601 string in `tz`, with offset.
pub fn render_local(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}
