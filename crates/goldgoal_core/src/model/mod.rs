//! Goal tracking domain model.
//!
//! # Responsibility
//! - Define goal, period and log entry structures used by core logic.
//! - Own the period-windowed progress aggregation algorithm.
//!
//! # Invariants
//! - Every goal and log entry is identified by a stable UUID.
//! - Log entries are append-only and never edited in place.
//! - "Now" always comes from an injected `Clock`.

pub mod amount;
pub mod goal;
pub mod log_entry;
pub mod period;
pub mod progress;
pub mod window;
