//! Task persistence adapter over key-value storage.
//!
//! # Responsibility
//! - Serialize the full task collection into one JSON blob and back.
//! - Keep storage details out of the task store.
//!
//! # Invariants
//! - Saves always overwrite the whole snapshot; nothing is incremental.
//! - Snapshots with invalid tasks or duplicate ids are rejected as a whole.
//! - Only unusable data falls back to empty; storage failures propagate.
//! - The adapter never mutates tasks; it only copies snapshots in and out.

use crate::model::task::{Task, TaskId};
use crate::storage::{KeyValueStorage, StorageError};
use log::{error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the serialized task array.
pub const TASKS_STORAGE_KEY: &str = "tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for task snapshot reads and writes.
#[derive(Debug)]
pub enum RepoError {
    Storage(StorageError),
    Serialize(serde_json::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize tasks: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Persistence contract used by the task store.
pub trait TaskRepository {
    /// Returns the saved snapshot.
    ///
    /// A missing or unparseable snapshot loads as an empty list; backend
    /// failures are returned so callers never overwrite data they could
    /// not read.
    fn load_tasks(&self) -> RepoResult<Vec<Task>>;
    /// Replaces the saved snapshot with `tasks`.
    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()>;
}

/// Stores the task collection as a JSON array under one storage key.
pub struct KeyValueTaskRepository<S: KeyValueStorage> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> KeyValueTaskRepository<S> {
    /// Creates an adapter writing under [`TASKS_STORAGE_KEY`].
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, TASKS_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Strict snapshot read.
    ///
    /// # Errors
    /// - `Storage` when the backend read fails.
    /// - `InvalidData` when the blob is not a valid task array.
    pub fn read_snapshot(&self) -> RepoResult<Vec<Task>> {
        let Some(blob) = self.storage.get(&self.key)? else {
            return Ok(Vec::new());
        };
        decode_snapshot(&blob)
    }
}

impl<S: KeyValueStorage> TaskRepository for KeyValueTaskRepository<S> {
    fn load_tasks(&self) -> RepoResult<Vec<Task>> {
        match self.read_snapshot() {
            Ok(tasks) => {
                info!(
                    "event=tasks_load module=repo status=ok count={}",
                    tasks.len()
                );
                Ok(tasks)
            }
            Err(RepoError::InvalidData(message)) => {
                warn!("event=tasks_load module=repo status=fallback_empty error={message}");
                Ok(Vec::new())
            }
            Err(err) => {
                error!("event=tasks_load module=repo status=error error={err}");
                Err(err)
            }
        }
    }

    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()> {
        let blob = encode_snapshot(tasks)?;
        if let Err(err) = self.storage.set(&self.key, &blob) {
            error!(
                "event=tasks_save module=repo status=error count={} error={err}",
                tasks.len()
            );
            return Err(err.into());
        }
        info!(
            "event=tasks_save module=repo status=ok count={} bytes={}",
            tasks.len(),
            blob.len()
        );
        Ok(())
    }
}

/// Serializes a snapshot into the stored JSON layout.
pub fn encode_snapshot(tasks: &[Task]) -> RepoResult<String> {
    serde_json::to_string(tasks).map_err(RepoError::Serialize)
}

/// Parses and validates a stored JSON snapshot.
pub fn decode_snapshot(blob: &str) -> RepoResult<Vec<Task>> {
    let tasks: Vec<Task> = serde_json::from_str(blob)
        .map_err(|err| RepoError::InvalidData(format!("malformed task array: {err}")))?;

    let mut seen: HashSet<TaskId> = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        task.validate()
            .map_err(|err| RepoError::InvalidData(format!("task {}: {err}", task.id)))?;
        if !seen.insert(task.id) {
            return Err(RepoError::InvalidData(format!(
                "duplicate task id {}",
                task.id
            )));
        }
    }

    Ok(tasks)
}
