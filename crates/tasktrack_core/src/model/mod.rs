//! Task domain model.
//!
//! # Responsibility
//! - Define the single entity handled by core: the task record.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deletion removes the record; there are no tombstones.

pub mod task;
