//! Time source abstraction for progress windows.
//!
//! # Responsibility
//! - Supply the current instant together with the local UTC offset.
//! - Allow deterministic window computation in tests.
//!
//! # Invariants
//! - `now()` carries the offset used for local-midnight alignment of daily
//!   windows; callers must not assume UTC.

use chrono::{DateTime, FixedOffset, Local, TimeDelta};
use std::cell::Cell;

/// Source of "now" for goal mutations and window queries.
pub trait Clock {
    /// Returns the current instant in the caller's local offset.
    fn now(&self) -> DateTime<FixedOffset>;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }
}

/// Wall clock backed by the operating system local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Manually driven clock.
///
/// Holds one instant that only changes through `set`/`advance`.
#[derive(Debug, Clone)]
pub struct FixedClock {
    instant: Cell<DateTime<FixedOffset>>,
}

impl FixedClock {
    pub fn new(instant: DateTime<FixedOffset>) -> Self {
        Self {
            instant: Cell::new(instant),
        }
    }

    /// Parses an RFC 3339 timestamp, e.g. `2026-03-31T12:00:00+02:00`.
    pub fn from_rfc3339(value: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(value).map(Self::new)
    }

    pub fn set(&self, instant: DateTime<FixedOffset>) {
        self.instant.set(instant);
    }

    /// Moves the clock forward (or backward for negative deltas).
    ///
    /// Saturates at the current instant when the result is out of range.
    pub fn advance(&self, delta: TimeDelta) {
        let current = self.instant.get();
        self.instant
            .set(current.checked_add_signed(delta).unwrap_or(current));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.instant.get()
    }
}
