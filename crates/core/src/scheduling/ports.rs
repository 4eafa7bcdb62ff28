//! Port interfaces for occurrence scheduling
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use chrono_tz::Tz;
use teambeat_domain::{NewOccurrence, OccurrenceRow, Result, TeamScheduleConfig};

/// Read-only accessor for team schedule configurations
#[async_trait]
pub trait TeamConfigRepository: Send + Sync {
    /// Load the schedule configuration for a team, if any
    async fn find_by_team(&self, team_id: &str) -> Result<Option<TeamScheduleConfig>>;
}

/// Trait for persisting occurrences with insert-if-absent semantics
#[async_trait]
pub trait OccurrenceRepository: Send + Sync {
    /// Find an occurrence already generated for the same local calendar day
    async fn find_by_local_day(
        &self,
        organization_id: &str,
        team_id: &str,
        local_date_key: &str,
    ) -> Result<Option<OccurrenceRow>>;

    /// Insert unless a row with the same `(organization, team, scheduled
    /// instant)` already exists. Returns the new row id only when a row was
    /// actually inserted.
    async fn insert_if_absent(&self, occurrence: NewOccurrence) -> Result<Option<String>>;
}

/// Trait for resolving an organization's IANA timezone
///
/// Today every organization shares one configured value; keeping this behind
/// a trait lets per-organization storage slot in without touching core.
#[async_trait]
pub trait OrgTimezoneResolver: Send + Sync {
    /// Resolve the timezone for an organization
    async fn organization_timezone(&self, organization_id: &str) -> Result<Tz>;
}
