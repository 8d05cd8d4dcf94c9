//! Core use-case services.
//!
//! # Responsibility
//! - Pair goal mutations with persistence into single logical units.
//! - Keep the presentation layer decoupled from storage details.

pub mod goal_store;
