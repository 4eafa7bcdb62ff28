//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! scheduler.

/// Status newly generated occurrences are created with. Downstream lifecycle
/// transitions happen outside this core.
pub const OCCURRENCE_STATUS_PLANNING: &str = "Planning";

/// Meeting type stamped on every generated occurrence.
pub const MEETING_TYPE_CHECK_IN: &str = "check_in";

/// Ceiling on candidates produced by a single generation run. Reaching it is
/// a degenerate-configuration signal, logged and truncated, never an error.
pub const MAX_CANDIDATES_PER_RUN: usize = 1_000;
