//! Derived views over the task collection.
//!
//! # Responsibility
//! - Filter, search and sort tasks into a display projection.
//! - Compute per-status counts.
//!
//! # Invariants
//! - Projections borrow from the collection and never mutate it.
//! - Counts ignore the current filter/search/sort parameters.

pub mod projection;
pub mod stats;
