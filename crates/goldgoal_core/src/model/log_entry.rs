//! Progress log entry model.
//!
//! # Invariants
//! - A log entry is immutable after creation; fields are read-only.
//! - `date_time` is the creation instant, stored in UTC.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of one log entry.
pub type LogEntryId = Uuid;

/// One recorded amount change on a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    id: LogEntryId,
    /// Signed delta; negative values are corrections.
    amount_changed: f64,
    date_time: DateTime<Utc>,
}

impl LogEntry {
    /// Creates an entry with a generated ID.
    pub fn new(amount_changed: f64, date_time: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4(), amount_changed, date_time)
    }

    /// Creates an entry with a caller-provided ID (import/restore paths).
    pub fn with_id(id: LogEntryId, amount_changed: f64, date_time: DateTime<Utc>) -> Self {
        Self {
            id,
            amount_changed,
            date_time,
        }
    }

    pub fn id(&self) -> LogEntryId {
        self.id
    }

    pub fn amount_changed(&self) -> f64 {
        self.amount_changed
    }

    pub fn date_time(&self) -> DateTime<Utc> {
        self.date_time
    }
}
