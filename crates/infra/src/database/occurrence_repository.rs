//! SQLite-backed implementation of the OccurrenceRepository port.
//!
//! The `occurrences` table carries a UNIQUE constraint on
//! `(organization_id, team_id, scheduled_ts)`; `insert_if_absent` leans on
//! it with `ON CONFLICT DO NOTHING`, which is what makes concurrent
//! generation runs for the same team harmless.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{OptionalExtension, Row};
use teambeat_core::OccurrenceRepository;
use teambeat_domain::{NewOccurrence, OccurrenceRow, Result};
use tracing::{debug, instrument};

use crate::database::pool::{get_connection, SqlitePool};
use crate::errors::InfraError;

const OCCURRENCE_COLUMNS: &str = "id, organization_id, team_id, title, description,
            scheduled_ts, local_date_key, status, meeting_type, agenda, created_at";

/// SQLite implementation of OccurrenceRepository
pub struct SqliteOccurrenceRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteOccurrenceRepository {
    /// Create a new occurrence repository
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// All occurrences for a team in ascending schedule order.
    #[instrument(skip(self))]
    pub async fn list_for_team(
        &self,
        organization_id: &str,
        team_id: &str,
    ) -> Result<Vec<OccurrenceRow>> {
        let conn = get_connection(&self.pool)?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {OCCURRENCE_COLUMNS}
                 FROM occurrences
                 WHERE organization_id = ?1 AND team_id = ?2
                 ORDER BY scheduled_ts ASC"
            ))
            .map_err(InfraError::from)?;

        let rows = stmt
            .query_map(rusqlite::params![organization_id, team_id], map_occurrence_row)
            .map_err(InfraError::from)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(InfraError::from)?;

        Ok(rows)
    }
}

fn map_occurrence_row(row: &Row<'_>) -> rusqlite::Result<OccurrenceRow> {
    let agenda_json: String = row.get(9)?;
    // Column is NOT NULL with a '[]' default; tolerate bad JSON as empty.
    let agenda = serde_json::from_str(&agenda_json).unwrap_or_default();
    Ok(OccurrenceRow {
        id: row.get(0)?,
        organization_id: row.get(1)?,
        team_id: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        scheduled_ts: row.get(5)?,
        local_date_key: row.get(6)?,
        status: row.get(7)?,
        meeting_type: row.get(8)?,
        agenda,
        created_at: row.get(10)?,
    })
}

#[async_trait]
impl OccurrenceRepository for SqliteOccurrenceRepository {
    #[instrument(skip(self))]
    async fn find_by_local_day(
        &self,
        organization_id: &str,
        team_id: &str,
        local_date_key: &str,
    ) -> Result<Option<OccurrenceRow>> {
        let conn = get_connection(&self.pool)?;

        let row = conn
            .query_row(
                &format!(
                    "SELECT {OCCURRENCE_COLUMNS}
                     FROM occurrences
                     WHERE organization_id = ?1 AND team_id = ?2 AND local_date_key = ?3
                     LIMIT 1"
                ),
                rusqlite::params![organization_id, team_id, local_date_key],
                map_occurrence_row,
            )
            .optional()
            .map_err(InfraError::from)?;

        Ok(row)
    }

    #[instrument(skip(self, occurrence), fields(team_id = %occurrence.team_id, local_date_key = %occurrence.local_date_key))]
    async fn insert_if_absent(&self, occurrence: NewOccurrence) -> Result<Option<String>> {
        let conn = get_connection(&self.pool)?;

        let agenda_json =
            serde_json::to_string(&occurrence.agenda).map_err(InfraError::from)?;
        let now = Utc::now().timestamp();

        let inserted = conn
            .execute(
                "INSERT INTO occurrences (
                    id, organization_id, team_id, title, description,
                    scheduled_ts, local_date_key, status, meeting_type, agenda, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                ON CONFLICT(organization_id, team_id, scheduled_ts) DO NOTHING",
                rusqlite::params![
                    occurrence.id,
                    occurrence.organization_id,
                    occurrence.team_id,
                    occurrence.title,
                    occurrence.description,
                    occurrence.scheduled_utc.timestamp(),
                    occurrence.local_date_key,
                    occurrence.status,
                    occurrence.meeting_type,
                    agenda_json,
                    now,
                ],
            )
            .map_err(InfraError::from)?;

        if inserted == 0 {
            debug!(
                team_id = %occurrence.team_id,
                scheduled_ts = occurrence.scheduled_utc.timestamp(),
                "occurrence already present, insert skipped"
            );
            return Ok(None);
        }

        debug!(
            team_id = %occurrence.team_id,
            id = %occurrence.id,
            "inserted occurrence"
        );
        Ok(Some(occurrence.id))
    }
}
