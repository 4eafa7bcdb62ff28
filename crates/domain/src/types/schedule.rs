//! Team schedule configuration types
//!
//! These types describe *when* a team meets: the repetition cadence plus the
//! anchor fields pinning it to specific calendar points. Configurations are
//! authored externally; this core only reads them.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Repetition cadence of a team's check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    Daily,
    Weekly,
    BiWeekly,
    Monthly,
    Quarterly,
    HalfYearly,
    Annual,
}

impl Cadence {
    /// Parse the wire/store representation. Returns `None` for unrecognized
    /// values; callers decide the fallback (the store accessor falls back to
    /// weekly-on-Monday and logs).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "bi_weekly" => Some(Self::BiWeekly),
            "monthly" => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            "half_yearly" => Some(Self::HalfYearly),
            "annual" => Some(Self::Annual),
            _ => None,
        }
    }

    /// The wire/store representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::BiWeekly => "bi_weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::HalfYearly => "half_yearly",
            Self::Annual => "annual",
        }
    }

    /// Calendar-month spacing for month-based cadences; `None` for the
    /// day/week-based ones.
    pub fn month_interval(self) -> Option<u32> {
        match self {
            Self::Monthly => Some(1),
            Self::Quarterly => Some(3),
            Self::HalfYearly => Some(6),
            Self::Annual => Some(12),
            Self::Daily | Self::Weekly | Self::BiWeekly => None,
        }
    }
}

/// Which occurrence of the anchor weekday within a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekOfMonth {
    /// 1-indexed Nth occurrence (1-4 in valid configurations).
    Nth(u8),
    /// The final occurrence, whether it is the 4th or 5th.
    Last,
}

impl WeekOfMonth {
    /// Parse the store representation: `"1"`..`"4"` or `"last"`.
    pub fn parse(value: &str) -> Option<Self> {
        if value == "last" {
            return Some(Self::Last);
        }
        match value.parse::<u8>() {
            Ok(n) if (1..=4).contains(&n) => Some(Self::Nth(n)),
            _ => None,
        }
    }

    /// The store representation.
    pub fn encode(self) -> String {
        match self {
            Self::Nth(n) => n.to_string(),
            Self::Last => "last".to_string(),
        }
    }
}

/// Map a stored 0-6 day index (0 = Sunday) to a weekday.
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Inverse of [`weekday_from_index`].
pub fn weekday_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

/// A team's recurrence configuration.
///
/// Anchor fields are optional; accessors apply the documented defaults
/// (Monday / week 1 / month 1). For month-based cadences exactly one of
/// `anchor_day_of_month` or `(anchor_week_of_month, anchor_day_of_week)`
/// drives day-selection; `anchor_day_of_month` wins when both are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamScheduleConfig {
    pub team_id: String,
    pub organization_id: String,
    pub cadence: Cadence,
    /// Local wall-clock meeting time (`HH:MM:SS`).
    pub meeting_time: NaiveTime,
    pub anchor_day_of_week: Option<Weekday>,
    pub anchor_week_of_month: Option<WeekOfMonth>,
    pub anchor_day_of_month: Option<u32>,
    pub anchor_month: Option<u32>,
}

impl TeamScheduleConfig {
    /// Anchor weekday, defaulting to Monday.
    pub fn anchor_weekday(&self) -> Weekday {
        self.anchor_day_of_week.unwrap_or(Weekday::Mon)
    }

    /// Anchor week-of-month, defaulting to the first week.
    pub fn anchor_week(&self) -> WeekOfMonth {
        self.anchor_week_of_month.unwrap_or(WeekOfMonth::Nth(1))
    }

    /// Anchor month (1-12), defaulting to January.
    pub fn anchor_month_number(&self) -> u32 {
        self.anchor_month.unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cadence_round_trips_through_store_strings() {
        for cadence in [
            Cadence::Daily,
            Cadence::Weekly,
            Cadence::BiWeekly,
            Cadence::Monthly,
            Cadence::Quarterly,
            Cadence::HalfYearly,
            Cadence::Annual,
        ] {
            assert_eq!(Cadence::parse(cadence.as_str()), Some(cadence));
        }
    }

    #[test]
    fn unknown_cadence_does_not_parse() {
        assert_eq!(Cadence::parse("fortnightly"), None);
        assert_eq!(Cadence::parse(""), None);
    }

    #[test]
    fn month_intervals_match_cadence_spacing() {
        assert_eq!(Cadence::Monthly.month_interval(), Some(1));
        assert_eq!(Cadence::Quarterly.month_interval(), Some(3));
        assert_eq!(Cadence::HalfYearly.month_interval(), Some(6));
        assert_eq!(Cadence::Annual.month_interval(), Some(12));
        assert_eq!(Cadence::Weekly.month_interval(), None);
    }

    #[test]
    fn week_of_month_parses_numbers_and_last() {
        assert_eq!(WeekOfMonth::parse("1"), Some(WeekOfMonth::Nth(1)));
        assert_eq!(WeekOfMonth::parse("4"), Some(WeekOfMonth::Nth(4)));
        assert_eq!(WeekOfMonth::parse("last"), Some(WeekOfMonth::Last));
        assert_eq!(WeekOfMonth::parse("5"), None);
        assert_eq!(WeekOfMonth::parse("0"), None);
    }

    #[test]
    fn weekday_index_round_trips() {
        for index in 0..=6u8 {
            let weekday = weekday_from_index(index).unwrap();
            assert_eq!(weekday_index(weekday), index);
        }
        assert_eq!(weekday_from_index(7), None);
    }

    #[test]
    fn anchor_accessors_apply_defaults() {
        let config = TeamScheduleConfig {
            team_id: "team-1".into(),
            organization_id: "org-1".into(),
            cadence: Cadence::Weekly,
            meeting_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            anchor_day_of_week: None,
            anchor_week_of_month: None,
            anchor_day_of_month: None,
            anchor_month: None,
        };

        assert_eq!(config.anchor_weekday(), Weekday::Mon);
        assert_eq!(config.anchor_week(), WeekOfMonth::Nth(1));
        assert_eq!(config.anchor_month_number(), 1);
    }
}
