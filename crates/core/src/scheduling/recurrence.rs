//! Recurrence calculation
//!
//! Pure expansion of a team's cadence into candidate UTC instants within a
//! window. The enumeration is derived directly from the window's local date
//! range, so it is bounded by construction; a candidate ceiling additionally
//! guards degenerate configurations.
//!
//! Month-based cadences (monthly/quarterly/half-yearly/annual) share one
//! code path: a [`DaySelector`] picks the day within a month, and a month
//! filter keeps only months the cadence's interval lands on.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use teambeat_common::time::zone::{civil_to_utc, local_date};
use teambeat_domain::constants::MAX_CANDIDATES_PER_RUN;
use teambeat_domain::{Cadence, GenerationWindow, TeamScheduleConfig, WeekOfMonth};
use tracing::warn;

/// Compute the ascending list of candidate instants for a team within
/// `[window.from, window.to)`.
///
/// Every candidate satisfies both the window bounds and a per-candidate
/// future guard (`>= now`): a window that includes past dates still never
/// yields past-dated candidates.
pub fn candidates(
    config: &TeamScheduleConfig,
    window: &GenerationWindow,
    tz: Tz,
    now: DateTime<Utc>,
) -> Vec<DateTime<Utc>> {
    let start = local_date(window.from, tz);
    let end = local_date(window.to, tz);
    if end < start {
        return Vec::new();
    }

    let dates: Box<dyn Iterator<Item = NaiveDate>> = match config.cadence {
        Cadence::Daily => Box::new(start.iter_days().take_while(move |date| *date <= end)),
        Cadence::Weekly => Box::new(weekday_dates(start, end, config.anchor_weekday(), 7)),
        Cadence::BiWeekly => Box::new(weekday_dates(start, end, config.anchor_weekday(), 14)),
        cadence => {
            let interval = cadence.month_interval().unwrap_or(1);
            let selector = DaySelector::from_config(config);
            Box::new(month_dates(start, end, interval, config.anchor_month_number(), selector))
        }
    };

    let mut out = Vec::new();
    for date in dates {
        if out.len() >= MAX_CANDIDATES_PER_RUN {
            warn!(
                team_id = %config.team_id,
                cadence = config.cadence.as_str(),
                ceiling = MAX_CANDIDATES_PER_RUN,
                "candidate ceiling reached, returning partial list"
            );
            break;
        }
        let instant = civil_to_utc(date, config.meeting_time, tz);
        if instant >= now && window.contains(instant) {
            out.push(instant);
        }
    }
    out
}

/// Day-selection strategy for month-based cadences.
#[derive(Debug, Clone, Copy)]
enum DaySelector {
    /// Fixed day of month, clamped down to the month's last valid day.
    DayOfMonth(u32),
    /// Nth or last occurrence of a weekday within the month.
    NthWeekday { weekday: Weekday, week: WeekOfMonth },
}

impl DaySelector {
    fn from_config(config: &TeamScheduleConfig) -> Self {
        match config.anchor_day_of_month {
            Some(day) => Self::DayOfMonth(day),
            None => {
                Self::NthWeekday { weekday: config.anchor_weekday(), week: config.anchor_week() }
            }
        }
    }

    /// Resolve the selected day within the given month, if the month has
    /// one. Clamping rounds down only; a month with fewer matching weekdays
    /// than requested yields nothing.
    fn resolve(self, year: i32, month: u32) -> Option<NaiveDate> {
        match self {
            Self::DayOfMonth(day) => {
                let last = last_day_of_month(year, month)?;
                NaiveDate::from_ymd_opt(year, month, day.min(last))
            }
            Self::NthWeekday { weekday, week } => {
                let matches = matching_weekdays(year, month, weekday);
                match week {
                    WeekOfMonth::Nth(n) => {
                        matches.get(usize::from(n).checked_sub(1)?).copied()
                    }
                    WeekOfMonth::Last => matches.last().copied(),
                }
            }
        }
    }
}

/// Every occurrence of `weekday` matching the cadence's step, starting from
/// the first matching weekday on or after `start`.
fn weekday_dates(
    start: NaiveDate,
    end: NaiveDate,
    weekday: Weekday,
    step_days: i64,
) -> impl Iterator<Item = NaiveDate> {
    let offset = i64::from(
        (weekday.num_days_from_monday() + 7 - start.weekday().num_days_from_monday()) % 7,
    );
    (0i64..)
        .map_while(move |i| start.checked_add_signed(Duration::days(offset + i * step_days)))
        .take_while(move |date| *date <= end)
}

/// The cadence's selected day in each month the interval lands on, within
/// `[start, end]`.
fn month_dates(
    start: NaiveDate,
    end: NaiveDate,
    interval: u32,
    anchor_month: u32,
    selector: DaySelector,
) -> impl Iterator<Item = NaiveDate> {
    let first_month = NaiveDate::from_ymd_opt(start.year(), start.month(), 1);
    (0u32..)
        .map_while(move |i| first_month.and_then(|first| first.checked_add_months(Months::new(i))))
        .take_while(move |first| *first <= end)
        .filter(move |first| month_matches(first.month(), anchor_month, interval))
        .filter_map(move |first| selector.resolve(first.year(), first.month()))
        .filter(move |date| *date >= start && *date <= end)
}

/// Whether `month` is a whole number of `interval` calendar months (mod 12)
/// from `anchor_month`.
fn month_matches(month: u32, anchor_month: u32, interval: u32) -> bool {
    if interval == 0 {
        return true;
    }
    let diff = (month as i64 - anchor_month as i64).rem_euclid(12) as u32;
    diff % interval == 0
}

fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    next.pred_opt().map(|date| date.day())
}

fn matching_weekdays(year: i32, month: u32, weekday: Weekday) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|date| date.month() == month)
        .filter(|date| date.weekday() == weekday)
        .collect()
}
