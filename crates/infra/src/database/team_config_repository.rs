//! SQLite-backed implementation of the TeamConfigRepository port.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveTime;
use rusqlite::OptionalExtension;
use teambeat_core::TeamConfigRepository;
use teambeat_domain::{
    weekday_from_index, weekday_index, Cadence, Result, TeamBeatError, TeamScheduleConfig,
    WeekOfMonth,
};
use tracing::{instrument, warn};

use crate::database::pool::{get_connection, SqlitePool};
use crate::errors::InfraError;

/// SQLite implementation of TeamConfigRepository
pub struct SqliteTeamConfigRepository {
    pool: Arc<SqlitePool>,
}

/// Column values as stored, before interpretation.
struct RawConfig {
    organization_id: String,
    cadence: String,
    meeting_time: String,
    anchor_day_of_week: Option<i64>,
    anchor_week_of_month: Option<String>,
    anchor_day_of_month: Option<i64>,
    anchor_month: Option<i64>,
}

impl SqliteTeamConfigRepository {
    /// Create a new team configuration repository
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Insert or replace a team's configuration.
    ///
    /// Configurations are authored externally; this is store maintenance for
    /// seeding and tests, not part of the core port.
    #[instrument(skip(self, config), fields(team_id = %config.team_id))]
    pub async fn upsert(&self, config: &TeamScheduleConfig) -> Result<()> {
        let conn = get_connection(&self.pool)?;

        conn.execute(
            "INSERT INTO team_schedule_configs (
                team_id, organization_id, cadence, meeting_time,
                anchor_day_of_week, anchor_week_of_month, anchor_day_of_month, anchor_month
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(team_id) DO UPDATE SET
                organization_id = excluded.organization_id,
                cadence = excluded.cadence,
                meeting_time = excluded.meeting_time,
                anchor_day_of_week = excluded.anchor_day_of_week,
                anchor_week_of_month = excluded.anchor_week_of_month,
                anchor_day_of_month = excluded.anchor_day_of_month,
                anchor_month = excluded.anchor_month",
            rusqlite::params![
                config.team_id,
                config.organization_id,
                config.cadence.as_str(),
                config.meeting_time.format("%H:%M:%S").to_string(),
                config.anchor_day_of_week.map(weekday_index),
                config.anchor_week_of_month.map(WeekOfMonth::encode),
                config.anchor_day_of_month,
                config.anchor_month,
            ],
        )
        .map_err(InfraError::from)?;

        Ok(())
    }

    fn interpret(&self, team_id: &str, raw: RawConfig) -> Result<TeamScheduleConfig> {
        let cadence = Cadence::parse(&raw.cadence);
        if cadence.is_none() {
            warn!(team_id, cadence = %raw.cadence, "unrecognized cadence, falling back to weekly on Monday");
        }

        let meeting_time =
            NaiveTime::parse_from_str(&raw.meeting_time, "%H:%M:%S").map_err(|err| {
                TeamBeatError::InvalidInput(format!(
                    "invalid meeting_time for team {team_id}: {err}"
                ))
            })?;

        let anchor_day_of_week = match raw.anchor_day_of_week {
            Some(index) => {
                let weekday = u8::try_from(index).ok().and_then(weekday_from_index);
                if weekday.is_none() {
                    warn!(team_id, index, "anchor_day_of_week out of range, ignoring");
                }
                weekday
            }
            None => None,
        };

        let anchor_week_of_month = match raw.anchor_week_of_month.as_deref() {
            Some(value) => {
                let week = WeekOfMonth::parse(value);
                if week.is_none() {
                    warn!(team_id, value, "anchor_week_of_month out of range, ignoring");
                }
                week
            }
            None => None,
        };

        let anchor_day_of_month = validate_range(raw.anchor_day_of_month, 1..=31, || {
            warn!(team_id, "anchor_day_of_month out of range, ignoring");
        });
        let anchor_month = validate_range(raw.anchor_month, 1..=12, || {
            warn!(team_id, "anchor_month out of range, ignoring");
        });

        match cadence {
            Some(cadence) => Ok(TeamScheduleConfig {
                team_id: team_id.to_string(),
                organization_id: raw.organization_id,
                cadence,
                meeting_time,
                anchor_day_of_week,
                anchor_week_of_month,
                anchor_day_of_month,
                anchor_month,
            }),
            // Unrecognized cadence: weekly on Monday, ignoring stored anchors.
            None => Ok(TeamScheduleConfig {
                team_id: team_id.to_string(),
                organization_id: raw.organization_id,
                cadence: Cadence::Weekly,
                meeting_time,
                anchor_day_of_week: Some(chrono::Weekday::Mon),
                anchor_week_of_month: None,
                anchor_day_of_month: None,
                anchor_month: None,
            }),
        }
    }
}

fn validate_range(
    value: Option<i64>,
    range: std::ops::RangeInclusive<i64>,
    on_invalid: impl FnOnce(),
) -> Option<u32> {
    let value = value?;
    if range.contains(&value) {
        u32::try_from(value).ok()
    } else {
        on_invalid();
        None
    }
}

#[async_trait]
impl TeamConfigRepository for SqliteTeamConfigRepository {
    #[instrument(skip(self))]
    async fn find_by_team(&self, team_id: &str) -> Result<Option<TeamScheduleConfig>> {
        let conn = get_connection(&self.pool)?;

        let raw = conn
            .query_row(
                "SELECT organization_id, cadence, meeting_time,
                        anchor_day_of_week, anchor_week_of_month,
                        anchor_day_of_month, anchor_month
                 FROM team_schedule_configs
                 WHERE team_id = ?1",
                rusqlite::params![team_id],
                |row| {
                    Ok(RawConfig {
                        organization_id: row.get(0)?,
                        cadence: row.get(1)?,
                        meeting_time: row.get(2)?,
                        anchor_day_of_week: row.get(3)?,
                        anchor_week_of_month: row.get(4)?,
                        anchor_day_of_month: row.get(5)?,
                        anchor_month: row.get(6)?,
                    })
                },
            )
            .optional()
            .map_err(InfraError::from)?;

        match raw {
            Some(raw) => self.interpret(team_id, raw).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;
    use crate::database::pool::create_in_memory_pool;

    fn config() -> TeamScheduleConfig {
        TeamScheduleConfig {
            team_id: "team-1".into(),
            organization_id: "org-1".into(),
            cadence: Cadence::Monthly,
            meeting_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            anchor_day_of_week: Some(Weekday::Fri),
            anchor_week_of_month: Some(WeekOfMonth::Last),
            anchor_day_of_month: None,
            anchor_month: None,
        }
    }

    #[tokio::test]
    async fn upsert_and_find_round_trips() {
        let pool = create_in_memory_pool().unwrap();
        let repo = SqliteTeamConfigRepository::new(pool);

        repo.upsert(&config()).await.unwrap();
        let found = repo.find_by_team("team-1").await.unwrap().unwrap();

        assert_eq!(found.organization_id, "org-1");
        assert_eq!(found.cadence, Cadence::Monthly);
        assert_eq!(found.meeting_time, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(found.anchor_day_of_week, Some(Weekday::Fri));
        assert_eq!(found.anchor_week_of_month, Some(WeekOfMonth::Last));
        assert_eq!(found.anchor_day_of_month, None);
    }

    #[tokio::test]
    async fn missing_team_returns_none() {
        let pool = create_in_memory_pool().unwrap();
        let repo = SqliteTeamConfigRepository::new(pool);

        assert!(repo.find_by_team("no-such-team").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unrecognized_cadence_falls_back_to_weekly_monday() {
        let pool = create_in_memory_pool().unwrap();
        {
            let conn = get_connection(&pool).unwrap();
            conn.execute(
                "INSERT INTO team_schedule_configs
                    (team_id, organization_id, cadence, meeting_time, anchor_day_of_week)
                 VALUES ('team-2', 'org-1', 'fortnightly', '10:00:00', 5)",
                rusqlite::params![],
            )
            .unwrap();
        }
        let repo = SqliteTeamConfigRepository::new(pool);

        let found = repo.find_by_team("team-2").await.unwrap().unwrap();

        assert_eq!(found.cadence, Cadence::Weekly);
        assert_eq!(found.anchor_day_of_week, Some(Weekday::Mon));
    }

    #[tokio::test]
    async fn out_of_range_anchors_are_ignored() {
        let pool = create_in_memory_pool().unwrap();
        {
            let conn = get_connection(&pool).unwrap();
            conn.execute(
                "INSERT INTO team_schedule_configs
                    (team_id, organization_id, cadence, meeting_time,
                     anchor_day_of_week, anchor_day_of_month, anchor_month)
                 VALUES ('team-3', 'org-1', 'monthly', '10:00:00', 9, 42, 13)",
                rusqlite::params![],
            )
            .unwrap();
        }
        let repo = SqliteTeamConfigRepository::new(pool);

        let found = repo.find_by_team("team-3").await.unwrap().unwrap();

        assert_eq!(found.anchor_day_of_week, None);
        assert_eq!(found.anchor_day_of_month, None);
        assert_eq!(found.anchor_month, None);
    }

    #[tokio::test]
    async fn malformed_meeting_time_is_an_error() {
        let pool = create_in_memory_pool().unwrap();
        {
            let conn = get_connection(&pool).unwrap();
            conn.execute(
                "INSERT INTO team_schedule_configs
                    (team_id, organization_id, cadence, meeting_time)
                 VALUES ('team-4', 'org-1', 'weekly', 'noonish')",
                rusqlite::params![],
            )
            .unwrap();
        }
        let repo = SqliteTeamConfigRepository::new(pool);

        let err = repo.find_by_team("team-4").await.unwrap_err();
        assert!(matches!(err, TeamBeatError::InvalidInput(_)));
    }
}
