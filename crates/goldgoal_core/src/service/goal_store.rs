//! Goal store aggregate root.
//!
//! # Responsibility
//! - Own the ordered goal collection for one process run.
//! - Apply every mutation followed by a full synchronous save as one unit.
//! - Offer read-only views used by the presentation layer after each call.
//!
//! # Invariants
//! - Insertion order is preserved; removal never reorders other goals.
//! - A failed save rolls the in-memory mutation back, so memory matches the
//!   still-intact persisted state.
//! - Operations that change nothing (unknown id, rejected input) do not save.
//! - All mutations take `&mut self`; there is no background writer.

use crate::clock::Clock;
use crate::model::amount::AmountError;
use crate::model::goal::{Goal, GoalId};
use crate::model::log_entry::LogEntry;
use crate::model::period::Period;
use crate::model::progress::ProgressSeries;
use crate::repo::goal_repo::{GoalRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Goal store use-case error.
#[derive(Debug)]
pub enum StoreError {
    GoalNotFound(GoalId),
    Amount(AmountError),
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GoalNotFound(id) => write!(f, "goal not found: {id}"),
            Self::Amount(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::GoalNotFound(_) => None,
            Self::Amount(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<AmountError> for StoreError {
    fn from(value: AmountError) -> Self {
        Self::Amount(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Ordered goal collection bound to a persistence gateway and a clock.
pub struct GoalStore<R: GoalRepository, C: Clock> {
    repo: R,
    clock: C,
    goals: Vec<Goal>,
}

impl<R: GoalRepository, C: Clock> GoalStore<R, C> {
    /// Loads the persisted collection.
    ///
    /// A missing goal file is a first run and yields an empty store.
    ///
    /// # Errors
    /// - `StoreError::Repo` for unreadable or malformed goal files. The store
    ///   does not attempt partial recovery; the caller decides whether to
    ///   reset or alert.
    pub fn open(repo: R, clock: C) -> StoreResult<Self> {
        let goals = match repo.load() {
            Ok(goals) => goals,
            Err(RepoError::ResourceMissing(_)) => {
                info!("event=store_open module=service status=empty");
                Vec::new()
            }
            Err(err) => {
                warn!("event=store_open module=service status=error error={}", err);
                return Err(err.into());
            }
        };

        info!(
            "event=store_open module=service status=ok goals={}",
            goals.len()
        );
        Ok(Self { repo, clock, goals })
    }

    /// Starts with an empty collection without reading storage.
    pub fn new_empty(repo: R, clock: C) -> Self {
        Self {
            repo,
            clock,
            goals: Vec::new(),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// All goals in insertion order.
    pub fn all(&self) -> &[Goal] {
        &self.goals
    }

    /// Goals of one period, in insertion order.
    pub fn by_period(&self, period: Period) -> impl Iterator<Item = &Goal> + '_ {
        self.goals.iter().filter(move |goal| goal.period == period)
    }

    pub fn get(&self, id: GoalId) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.id() == id)
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Persists the current collection as-is.
    pub fn save(&self) -> StoreResult<()> {
        self.repo.save(&self.goals)?;
        Ok(())
    }

    /// Appends `goal` and saves.
    pub fn add(&mut self, goal: Goal) -> StoreResult<GoalId> {
        let id = goal.id();
        self.goals.push(goal);

        if let Err(err) = self.repo.save(&self.goals) {
            self.goals.pop();
            return Err(err.into());
        }

        info!(
            "event=goal_add module=service status=ok goal_id={} goals={}",
            id,
            self.goals.len()
        );
        Ok(id)
    }

    /// Removes the first goal with `id` and saves.
    ///
    /// # Errors
    /// - `StoreError::GoalNotFound` when no goal matches; nothing is saved.
    pub fn remove(&mut self, id: GoalId) -> StoreResult<Goal> {
        let index = self.index_of(id).ok_or(StoreError::GoalNotFound(id))?;
        let removed = self.goals.remove(index);

        if let Err(err) = self.repo.save(&self.goals) {
            self.goals.insert(index, removed);
            return Err(err.into());
        }

        info!(
            "event=goal_remove module=service status=ok goal_id={} goals={}",
            id,
            self.goals.len()
        );
        Ok(removed)
    }

    /// Applies the goal's quick-add increment and saves.
    pub fn quick_add(&mut self, id: GoalId) -> StoreResult<LogEntry> {
        self.mutate_goal(id, "quick_add", |goal, clock| {
            Ok(goal.quick_add(clock).clone())
        })
    }

    /// Records the remainder for the current window and saves.
    pub fn finish_goal(&mut self, id: GoalId) -> StoreResult<LogEntry> {
        self.mutate_goal(id, "finish_goal", |goal, clock| {
            Ok(goal.finish_goal(clock).clone())
        })
    }

    /// Records a user-typed amount and saves.
    ///
    /// # Errors
    /// - `StoreError::Amount` for unparsable input; nothing changes or saves.
    pub fn manual_add(&mut self, id: GoalId, input: &str) -> StoreResult<LogEntry> {
        self.mutate_goal(id, "manual_add", |goal, clock| {
            Ok(goal.manual_add(input, clock)?.clone())
        })
    }

    pub fn to_go(&self, id: GoalId) -> Option<f64> {
        self.get(id).map(|goal| goal.to_go(&self.clock))
    }

    /// Raw fraction; see `Goal::to_go_percentage`.
    pub fn to_go_percentage(&self, id: GoalId) -> Option<f64> {
        self.get(id).map(|goal| goal.to_go_percentage(&self.clock))
    }

    pub fn progress_series(&self, id: GoalId, bar_count: u32) -> Option<ProgressSeries> {
        self.get(id)
            .map(|goal| goal.progress_series(&self.clock, bar_count))
    }

    fn index_of(&self, id: GoalId) -> Option<usize> {
        self.goals.iter().position(|goal| goal.id() == id)
    }

    fn mutate_goal<T>(
        &mut self,
        id: GoalId,
        action: &'static str,
        apply: impl FnOnce(&mut Goal, &C) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let index = self.index_of(id).ok_or(StoreError::GoalNotFound(id))?;
        let snapshot = self.goals[index].clone();

        let value = apply(&mut self.goals[index], &self.clock)?;

        if let Err(err) = self.repo.save(&self.goals) {
            self.goals[index] = snapshot;
            warn!(
                "event=goal_update module=service status=rolled_back action={} goal_id={}",
                action, id
            );
            return Err(err.into());
        }

        info!(
            "event=goal_update module=service status=ok action={} goal_id={}",
            action, id
        );
        Ok(value)
    }
}
