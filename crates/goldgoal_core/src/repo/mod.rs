//! Persistence gateway abstractions and implementations.
//!
//! # Responsibility
//! - Define the whole-collection load/save contract for goals.
//! - Isolate file format and filesystem details from the goal store.
//!
//! # Invariants
//! - Missing, unreadable, malformed and unwritable storage map to distinct
//!   `RepoError` variants.
//! - A failed save never corrupts the previously persisted state.

pub mod goal_repo;
