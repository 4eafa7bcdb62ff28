//! Occurrence scheduling service - core business logic
//!
//! Composes the window clipper and recurrence calculator with the external
//! stores. Generation is idempotent and replay-safe: the local-day pre-check
//! skips occurrences that already exist for the same local calendar day, and
//! the store's uniqueness constraint on the scheduled instant is the true
//! race-safety boundary for concurrent invocations.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use teambeat_common::testing::{Clock, SystemClock};
use teambeat_common::time::zone::{local_date_key, render_local, render_utc};
use teambeat_domain::{
    GenerationResult, GenerationWindow, NewOccurrence, PreviewEntry, Result, TeamScheduleConfig,
};
use tracing::{debug, info, instrument, warn};

use super::ports::{OccurrenceRepository, OrgTimezoneResolver, TeamConfigRepository};
use super::{recurrence, window};

/// Occurrence scheduling service
pub struct SchedulingService {
    teams: Arc<dyn TeamConfigRepository>,
    occurrences: Arc<dyn OccurrenceRepository>,
    timezones: Arc<dyn OrgTimezoneResolver>,
    clock: Arc<dyn Clock>,
}

impl SchedulingService {
    /// Create a new scheduling service using the system clock
    pub fn new(
        teams: Arc<dyn TeamConfigRepository>,
        occurrences: Arc<dyn OccurrenceRepository>,
        timezones: Arc<dyn OrgTimezoneResolver>,
    ) -> Self {
        Self { teams, occurrences, timezones, clock: Arc::new(SystemClock) }
    }

    /// Replace the clock, for deterministic tests
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Generate and persist occurrences for a team within `[from, to)`.
    ///
    /// A missing team configuration short-circuits to an empty result. A
    /// failure to persist one candidate is logged and excluded from
    /// `created_ids`; the remaining candidates are still processed. Only a
    /// failure to reach the stores themselves propagates as an error.
    #[instrument(skip(self, window), fields(from = %window.from, to = %window.to))]
    pub async fn generate_occurrences(
        &self,
        team_id: &str,
        window: GenerationWindow,
    ) -> Result<GenerationResult> {
        let Some(config) = self.teams.find_by_team(team_id).await? else {
            warn!(team_id, "no schedule configuration found for team, skipping generation");
            return Ok(GenerationResult::default());
        };

        let tz = self.timezones.organization_timezone(&config.organization_id).await?;
        let now = self.clock.now_utc();
        let candidates = Self::candidates_for(&config, window, tz, now);

        let preview: Vec<String> = candidates.iter().map(|instant| render_utc(*instant)).collect();
        let mut created_ids = Vec::new();

        for instant in &candidates {
            let date_key = local_date_key(*instant, tz);
            match self.persist_candidate(&config, *instant, &date_key).await {
                Ok(Some(id)) => created_ids.push(id),
                Ok(None) => {
                    debug!(team_id, date_key = %date_key, "occurrence already exists, skipping");
                }
                Err(err) => {
                    warn!(
                        team_id,
                        date_key = %date_key,
                        error = %err,
                        "failed to persist occurrence candidate, continuing"
                    );
                }
            }
        }

        info!(
            team_id,
            considered = candidates.len(),
            created = created_ids.len(),
            "occurrence generation finished"
        );

        Ok(GenerationResult { created_count: created_ids.len(), created_ids, preview })
    }

    /// Dry-run preview: the first `limit` candidates the generation pipeline
    /// would consider, rendered as local/UTC pairs, with no persistence.
    ///
    /// Runs the identical clipping and calculation path as
    /// [`Self::generate_occurrences`], which guarantees preview/actual
    /// parity.
    #[instrument(skip(self, window), fields(from = %window.from, to = %window.to))]
    pub async fn preview_occurrences(
        &self,
        team_id: &str,
        window: GenerationWindow,
        limit: usize,
    ) -> Result<Vec<PreviewEntry>> {
        let Some(config) = self.teams.find_by_team(team_id).await? else {
            warn!(team_id, "no schedule configuration found for team, nothing to preview");
            return Ok(Vec::new());
        };

        let tz = self.timezones.organization_timezone(&config.organization_id).await?;
        let now = self.clock.now_utc();

        Ok(Self::candidates_for(&config, window, tz, now)
            .into_iter()
            .take(limit)
            .map(|instant| PreviewEntry {
                local: render_local(instant, tz),
                utc: render_utc(instant),
            })
            .collect())
    }

    fn candidates_for(
        config: &TeamScheduleConfig,
        window: GenerationWindow,
        tz: Tz,
        now: DateTime<Utc>,
    ) -> Vec<DateTime<Utc>> {
        match window::clip(window, now, tz) {
            Some(clipped) => recurrence::candidates(config, &clipped, tz, now),
            None => Vec::new(),
        }
    }

    /// Insert one candidate unless an occurrence already exists for the same
    /// local calendar day or the same scheduled instant.
    ///
    /// The local-day pre-check exists in addition to the store's uniqueness
    /// constraint: the constraint keys on the literal UTC instant, while DST
    /// shifts or configuration edits can map two distinct instants onto the
    /// same local day.
    async fn persist_candidate(
        &self,
        config: &TeamScheduleConfig,
        instant: DateTime<Utc>,
        date_key: &str,
    ) -> Result<Option<String>> {
        let existing = self
            .occurrences
            .find_by_local_day(&config.organization_id, &config.team_id, date_key)
            .await?;
        if existing.is_some() {
            return Ok(None);
        }

        let occurrence = NewOccurrence::check_in(config, instant, date_key.to_string());
        self.occurrences.insert_if_absent(occurrence).await
    }
}
