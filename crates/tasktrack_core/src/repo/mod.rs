//! Persistence adapters for the task collection.
//!
//! # Responsibility
//! - Define the snapshot load/save contract consumed by the task store.
//! - Isolate serialization details from service/business orchestration.
//!
//! # Invariants
//! - Loading fails open to an empty collection on missing or corrupt data.
//! - Storage read failures are returned, never masked as an empty list.
//! - Save failures are returned to the caller, never swallowed.

pub mod task_repo;
