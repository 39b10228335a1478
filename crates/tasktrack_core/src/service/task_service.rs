//! Task store use-case service.
//!
//! # Responsibility
//! - Own the in-memory task collection and every mutation of it.
//! - Save the full snapshot through the persistence adapter after each
//!   applied mutation.
//!
//! # Invariants
//! - Task ids are unique across the collection.
//! - Declined intents (blank title, unknown id) leave the collection and
//!   storage untouched and are reported as `Outcome::Rejected`.
//! - A failed save keeps the in-memory change and returns
//!   `ServiceError::Persistence`.
//! - A failed load returns `ServiceError::Load` instead of an empty store.

use crate::model::task::{normalize_description, normalize_title, Task, TaskId, TaskPriority};
use crate::query::projection::{project, TaskQuery};
use crate::query::stats::TaskStats;
use crate::repo::task_repo::{RepoError, TaskRepository};
use log::{debug, error, info};
use mockable::Clock;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Unrecoverable failure of a store operation.
#[derive(Debug)]
pub enum ServiceError {
    /// The saved snapshot could not be read; the store was not opened.
    Load(RepoError),
    /// The mutation was applied in memory but could not be saved.
    Persistence(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(err) => write!(f, "failed to load tasks: {err}"),
            Self::Persistence(err) => write!(f, "failed to save tasks: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Load(err) | Self::Persistence(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Persistence(value)
    }
}

/// Reason an intent was declined without side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    EmptyTitle,
    UnknownTask(TaskId),
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::UnknownTask(id) => write!(f, "task not found: {id}"),
        }
    }
}

/// Result of a mutating intent that did not hit a storage failure.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    Applied(T),
    Rejected(Rejection),
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Applied(_) => None,
            Self::Rejected(reason) => Some(*reason),
        }
    }
}

/// Input for the add-task intent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }
}

/// Partial replacement of editable task fields.
///
/// `description: Some("")` clears the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.priority.is_none()
    }
}

/// In-memory task store backed by a persistence adapter.
pub struct TaskService<R: TaskRepository, C: Clock> {
    repo: R,
    clock: C,
    tasks: Vec<Task>,
}

impl<R: TaskRepository, C: Clock> TaskService<R, C> {
    /// Creates a store seeded from the adapter's saved snapshot.
    ///
    /// # Errors
    /// - `Load` when the backend cannot be read. No store is returned, so
    ///   nothing can overwrite the unread snapshot.
    pub fn open(repo: R, clock: C) -> ServiceResult<Self> {
        let tasks = repo.load_tasks().map_err(|err| {
            error!("event=store_open module=service status=error error_code=load_failed error={err}");
            ServiceError::Load(err)
        })?;
        info!(
            "event=store_open module=service status=ok count={}",
            tasks.len()
        );
        Ok(Self { repo, clock, tasks })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Filtered/searched/sorted view of the current collection.
    pub fn project(&self, query: &TaskQuery) -> Vec<&Task> {
        project(&self.tasks, query)
    }

    /// Counts over the whole collection.
    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }

    /// Appends a new `todo` task.
    ///
    /// # Contract
    /// - Blank title: `Rejected(EmptyTitle)`, nothing saved.
    /// - Otherwise: `Applied(task)` after the snapshot is saved.
    pub fn add_task(&mut self, request: &NewTask) -> ServiceResult<Outcome<Task>> {
        let task = match Task::new(
            &request.title,
            request.description.as_deref(),
            request.priority,
            self.clock.utc(),
        ) {
            Ok(task) => task,
            Err(_) => return Ok(decline("task_add", Rejection::EmptyTitle)),
        };

        self.tasks.push(task.clone());
        self.persist("task_add", task.id)?;
        Ok(Outcome::Applied(task))
    }

    /// Moves a task one step through `todo -> in-progress -> done -> todo`.
    pub fn advance_status(&mut self, id: TaskId) -> ServiceResult<Outcome<Task>> {
        let now = self.clock.utc();
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(decline("task_advance", Rejection::UnknownTask(id)));
        };

        let status = task.advance(now);
        let advanced = task.clone();
        debug!("event=task_advance module=service task_id={id} status={status}");
        self.persist("task_advance", id)?;
        Ok(Outcome::Applied(advanced))
    }

    /// Removes a task and returns it.
    pub fn delete_task(&mut self, id: TaskId) -> ServiceResult<Outcome<Task>> {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            return Ok(decline("task_delete", Rejection::UnknownTask(id)));
        };

        let removed = self.tasks.remove(index);
        self.persist("task_delete", id)?;
        Ok(Outcome::Applied(removed))
    }

    /// Replaces editable fields of an existing task.
    ///
    /// # Contract
    /// - Unknown id: `Rejected(UnknownTask)`.
    /// - Blank patched title: `Rejected(EmptyTitle)`, task unchanged.
    /// - Empty patch: `Applied(task)` unchanged and not saved.
    /// - Status and `created_at` are never touched.
    pub fn update_task(&mut self, id: TaskId, patch: &TaskPatch) -> ServiceResult<Outcome<Task>> {
        let now = self.clock.utc();
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            return Ok(decline("task_update", Rejection::UnknownTask(id)));
        };

        if patch.is_empty() {
            return Ok(Outcome::Applied(self.tasks[index].clone()));
        }

        let title = match patch.title.as_deref() {
            Some(raw) => match normalize_title(raw) {
                Some(title) => Some(title),
                None => return Ok(decline("task_update", Rejection::EmptyTitle)),
            },
            None => None,
        };

        let task = &mut self.tasks[index];
        if let Some(title) = title {
            task.title = title;
        }
        if let Some(description) = patch.description.as_deref() {
            task.description = normalize_description(Some(description));
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        task.touch(now);
        let updated = task.clone();

        self.persist("task_update", id)?;
        Ok(Outcome::Applied(updated))
    }

    fn persist(&self, event: &'static str, id: TaskId) -> ServiceResult<()> {
        match self.repo.save_tasks(&self.tasks) {
            Ok(()) => {
                info!(
                    "event={event} module=service status=ok task_id={id} count={}",
                    self.tasks.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event={event} module=service status=error error_code=save_failed task_id={id} error={err}"
                );
                Err(err.into())
            }
        }
    }
}

fn decline<T>(event: &'static str, reason: Rejection) -> Outcome<T> {
    let reason_code = match reason {
        Rejection::EmptyTitle => "empty_title",
        Rejection::UnknownTask(_) => "unknown_task",
    };
    info!("event={event} module=service status=rejected reason={reason_code}");
    Outcome::Rejected(reason)
}
