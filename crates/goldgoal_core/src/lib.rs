//! Core domain logic for Golden Goals.
//! This crate is the single source of truth for goal and progress invariants.
//!
//! The presentation layer constructs a `StoreConfig`, a
//! `JsonFileGoalRepository` and a `Clock`, opens a `GoalStore`, and re-reads
//! derived progress after every mutation call.

pub mod clock;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, StoreConfig, DEFAULT_GOALS_FILE_NAME};
pub use logging::{init_logging, logging_status, LogLevel, LoggingError};
pub use model::amount::{is_amount_input, parse_amount, AmountError};
pub use model::goal::{clamp_fraction, Goal, GoalId, GoalState};
pub use model::log_entry::{LogEntry, LogEntryId};
pub use model::period::{Period, UnknownPeriod};
pub use model::progress::{ProgressBar, ProgressSeries, DEFAULT_BAR_COUNT};
pub use model::window::PeriodWindow;
pub use repo::goal_repo::{GoalRepository, JsonFileGoalRepository, RepoError, RepoResult};
pub use service::goal_store::{GoalStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
