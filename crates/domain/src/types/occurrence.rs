//! Occurrence and generation types
//!
//! These types represent the persisted occurrence rows and the value objects
//! flowing through a generation run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{MEETING_TYPE_CHECK_IN, OCCURRENCE_STATUS_PLANNING};
use crate::types::schedule::TeamScheduleConfig;

/// Parameters for inserting a new occurrence row.
#[derive(Debug, Clone)]
pub struct NewOccurrence {
    pub id: String,
    pub organization_id: String,
    pub team_id: String,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_utc: DateTime<Utc>,
    /// Local calendar day (`YYYY-MM-DD`) used as the semantic idempotency
    /// key; distinct from the literal UTC timestamp.
    pub local_date_key: String,
    pub status: String,
    pub meeting_type: String,
    pub agenda: Vec<String>,
}

impl NewOccurrence {
    /// Build a check-in occurrence for a team at the given instant, with the
    /// initial status and an empty agenda.
    pub fn check_in(
        config: &TeamScheduleConfig,
        scheduled_utc: DateTime<Utc>,
        local_date_key: String,
    ) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            organization_id: config.organization_id.clone(),
            team_id: config.team_id.clone(),
            title: format!("Team check-in {local_date_key}"),
            description: None,
            scheduled_utc,
            local_date_key,
            status: OCCURRENCE_STATUS_PLANNING.to_string(),
            meeting_type: MEETING_TYPE_CHECK_IN.to_string(),
            agenda: Vec::new(),
        }
    }
}

/// Occurrence row as persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccurrenceRow {
    pub id: String,
    pub organization_id: String,
    pub team_id: String,
    pub title: String,
    pub description: Option<String>,
    /// Scheduled instant as epoch seconds.
    pub scheduled_ts: i64,
    pub local_date_key: String,
    pub status: String,
    pub meeting_type: String,
    pub agenda: Vec<String>,
    pub created_at: i64,
}

impl OccurrenceRow {
    /// Get the scheduled instant as `DateTime<Utc>`
    pub fn scheduled_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.scheduled_ts, 0)
    }
}

/// Requested generation window, `to` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl GenerationWindow {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// Whether `instant` falls within `[from, to)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant < self.to
    }
}

/// Summary of a generation run.
///
/// `preview` lists every candidate considered (ISO-8601 UTC strings), not
/// only those persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationResult {
    pub created_count: usize,
    pub created_ids: Vec<String>,
    pub preview: Vec<String>,
}

/// A single dry-run preview line: the candidate rendered both in the
/// organization's timezone and in UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewEntry {
    pub local: String,
    pub utc: String,
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveTime, TimeZone};

    use super::*;
    use crate::types::schedule::Cadence;

    fn config() -> TeamScheduleConfig {
        TeamScheduleConfig {
            team_id: "team-1".into(),
            organization_id: "org-1".into(),
            cadence: Cadence::Weekly,
            meeting_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            anchor_day_of_week: None,
            anchor_week_of_month: None,
            anchor_day_of_month: None,
            anchor_month: None,
        }
    }

    #[test]
    fn check_in_occurrence_carries_initial_state() {
        let scheduled = Utc.with_ymd_and_hms(2024, 6, 3, 7, 30, 0).unwrap();
        let occurrence = NewOccurrence::check_in(&config(), scheduled, "2024-06-03".into());

        assert_eq!(occurrence.organization_id, "org-1");
        assert_eq!(occurrence.team_id, "team-1");
        assert_eq!(occurrence.status, "Planning");
        assert_eq!(occurrence.meeting_type, "check_in");
        assert!(occurrence.agenda.is_empty());
        assert!(occurrence.title.contains("2024-06-03"));
        assert!(!occurrence.id.is_empty());
    }

    #[test]
    fn window_contains_is_half_open() {
        let from = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 6, 8, 0, 0, 0).unwrap();
        let window = GenerationWindow::new(from, to);

        assert!(window.contains(from));
        assert!(!window.contains(to));
        assert!(window.contains(from + chrono::Duration::days(3)));
    }

    #[test]
    fn scheduled_utc_converts_epoch_seconds() {
        let row = OccurrenceRow {
            id: "id".into(),
            organization_id: "org-1".into(),
            team_id: "team-1".into(),
            title: "t".into(),
            description: None,
            scheduled_ts: 1_717_405_800,
            local_date_key: "2024-06-03".into(),
            status: "Planning".into(),
            meeting_type: "check_in".into(),
            agenda: vec![],
            created_at: 0,
        };

        assert_eq!(row.scheduled_utc(), Some(Utc.with_ymd_and_hms(2024, 6, 3, 9, 10, 0).unwrap()));
    }
}
