//! Goal domain model and progress algorithm.
//!
//! # Responsibility
//! - Hold goal configuration and its append-only log history.
//! - Apply quick/finish/manual mutations, each recording one `LogEntry`.
//! - Derive windowed progress (`to_go`, `to_go_percentage`, history).
//!
//! # Invariants
//! - `id` is stable and never reassigned.
//! - `current_amount` equals the sum of every `logs[i].amount_changed`; it is
//!   a lifetime total, not reset per period.
//! - `logs` is append-only, so insertion order is chronological order.
//! - Every mutation reads the clock exactly once; the recorded timestamp and
//!   the window used to compute it share the same instant.

use crate::clock::Clock;
use crate::model::amount::{parse_amount, AmountError};
use crate::model::log_entry::LogEntry;
use crate::model::period::Period;
use crate::model::window::PeriodWindow;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a goal.
pub type GoalId = Uuid;

/// User-defined numeric target measured over a recurring period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    id: GoalId,
    /// Display label. Callers must not pass an empty string.
    pub name: String,
    pub period: Period,
    /// Target per period. Expected to be `> 0`; see `to_go_percentage`.
    pub goal_amount: f64,
    current_amount: f64,
    /// Increment applied by `quick_add`.
    pub quick_add: f64,
    /// Free-form unit label, e.g. "minutes".
    pub unit: String,
    logs: Vec<LogEntry>,
}

/// Where the current window stands relative to the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GoalState {
    /// Still short by the carried amount.
    Remaining(f64),
    /// Exactly on target.
    Reached,
    /// Over target by the carried (positive) amount.
    Exceeded(f64),
}

impl Goal {
    /// Creates a goal with a generated ID, zero progress and no logs.
    pub fn new(
        name: impl Into<String>,
        period: Period,
        goal_amount: f64,
        quick_add: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), name, period, goal_amount, quick_add, unit)
    }

    /// Creates a goal with a caller-provided stable ID.
    pub fn with_id(
        id: GoalId,
        name: impl Into<String>,
        period: Period,
        goal_amount: f64,
        quick_add: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            period,
            goal_amount,
            current_amount: 0.0,
            quick_add,
            unit: unit.into(),
            logs: Vec::new(),
        }
    }

    pub fn id(&self) -> GoalId {
        self.id
    }

    /// Lifetime cumulative amount.
    pub fn current_amount(&self) -> f64 {
        self.current_amount
    }

    /// Full log history, oldest first.
    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    /// Newest-first view over at most `limit` entries.
    pub fn recent_logs(&self, limit: usize) -> impl Iterator<Item = &LogEntry> {
        self.logs.iter().rev().take(limit)
    }

    /// Sum of all recorded deltas. Equal to `current_amount()` for goals
    /// mutated only through this type.
    pub fn logs_total(&self) -> f64 {
        self.logs.iter().map(LogEntry::amount_changed).sum()
    }

    /// Adds the configured quick-add increment.
    pub fn quick_add<C: Clock + ?Sized>(&mut self, clock: &C) -> &LogEntry {
        let amount = self.quick_add;
        self.record(amount, clock.now())
    }

    /// Adds exactly what is still missing in the current window.
    ///
    /// When the window is already at or above target the recorded delta is
    /// zero or negative, bringing the window back to exactly `goal_amount`.
    pub fn finish_goal<C: Clock + ?Sized>(&mut self, clock: &C) -> &LogEntry {
        let now = clock.now();
        let remainder = self.to_go_at(now);
        self.record(remainder, now)
    }

    /// Adds a user-typed amount.
    ///
    /// # Errors
    /// - `AmountError::InvalidAmount` when `input` is not a finite number; the
    ///   goal is left untouched.
    pub fn manual_add<C: Clock + ?Sized>(
        &mut self,
        input: &str,
        clock: &C,
    ) -> Result<&LogEntry, AmountError> {
        let amount = parse_amount(input)?;
        Ok(self.record(amount, clock.now()))
    }

    /// Active window for this goal's period.
    pub fn current_period_window<C: Clock + ?Sized>(&self, clock: &C) -> PeriodWindow {
        PeriodWindow::current(self.period, clock.now())
    }

    /// Sum of deltas whose timestamp lies in `window` (inclusive).
    pub fn progress_in_window(&self, window: &PeriodWindow) -> f64 {
        self.logs
            .iter()
            .filter(|entry| window.contains(entry.date_time()))
            .map(LogEntry::amount_changed)
            .sum()
    }

    /// `goal_amount` minus progress in the current window. Negative when
    /// over-achieved.
    pub fn to_go<C: Clock + ?Sized>(&self, clock: &C) -> f64 {
        self.to_go_at(clock.now())
    }

    /// Fraction of the target met in the current window.
    ///
    /// The value is raw: it may be below 0, above 1, or NaN/infinite when
    /// `goal_amount == 0`. Pass it through `clamp_fraction` before using it as
    /// a progress-bar value.
    pub fn to_go_percentage<C: Clock + ?Sized>(&self, clock: &C) -> f64 {
        (self.goal_amount - self.to_go(clock)) / self.goal_amount
    }

    /// Progress in the window `periods_back` periods ago (`0` = current).
    pub fn historical_window_progress<C: Clock + ?Sized>(
        &self,
        clock: &C,
        periods_back: u32,
    ) -> f64 {
        let window = PeriodWindow::historical(self.period, clock.now(), periods_back);
        self.progress_in_window(&window)
    }

    /// Classifies the current window against the target.
    pub fn goal_state<C: Clock + ?Sized>(&self, clock: &C) -> GoalState {
        let to_go = self.to_go(clock);
        if to_go > 0.0 {
            GoalState::Remaining(to_go)
        } else if to_go < 0.0 {
            GoalState::Exceeded(-to_go)
        } else {
            GoalState::Reached
        }
    }

    fn to_go_at(&self, now: DateTime<FixedOffset>) -> f64 {
        let window = PeriodWindow::current(self.period, now);
        self.goal_amount - self.progress_in_window(&window)
    }

    fn record(&mut self, amount: f64, now: DateTime<FixedOffset>) -> &LogEntry {
        self.current_amount += amount;
        let index = self.logs.len();
        self.logs.push(LogEntry::new(amount, now.with_timezone(&Utc)));
        &self.logs[index]
    }
}

/// Clamps a raw `to_go_percentage` into `[0, 1]` for display.
///
/// NaN (zero target with zero progress) maps to `0`.
pub fn clamp_fraction(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
