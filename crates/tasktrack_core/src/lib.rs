//! Core domain logic for tasktrack.
//! This crate is the single source of truth for task invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod storage;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{
    ParseLabelError, Task, TaskId, TaskPriority, TaskStatus, TaskValidationError,
};
pub use query::projection::{project, SortKey, StatusFilter, TaskQuery};
pub use query::stats::TaskStats;
pub use repo::task_repo::{
    KeyValueTaskRepository, RepoError, RepoResult, TaskRepository, TASKS_STORAGE_KEY,
};
pub use service::task_service::{
    NewTask, Outcome, Rejection, ServiceError, ServiceResult, TaskPatch, TaskService,
};
pub use storage::{InMemoryStorage, KeyValueStorage, SqliteStorage, StorageError, StorageResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
