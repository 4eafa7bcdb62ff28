//! Domain types and models

pub mod occurrence;
pub mod schedule;

// Re-export for convenience
pub use occurrence::{
    GenerationResult, GenerationWindow, NewOccurrence, OccurrenceRow, PreviewEntry,
};
pub use schedule::{weekday_from_index, weekday_index, Cadence, TeamScheduleConfig, WeekOfMonth};
