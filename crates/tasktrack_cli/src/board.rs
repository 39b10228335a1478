//! Task board: the presentation-facing facade over the task store.
//!
//! # Responsibility
//! - Hold the current view parameters (filter, search, sort).
//! - Forward user intents to the store and wrap results in response
//!   envelopes the renderer can print.
//!
//! # Invariants
//! - Intents never panic; declines and save failures become `ok = false`.
//! - Task ids may be given in full or as a unique prefix.

use log::warn;
use mockable::Clock;
use tasktrack_core::{
    NewTask, Outcome, SortKey, StatusFilter, Task, TaskId, TaskPatch, TaskPriority, TaskQuery,
    TaskRepository, TaskService, TaskStats,
};
use uuid::Uuid;

/// Response envelope for one mutating intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardResponse {
    /// Whether the intent was applied and saved.
    pub ok: bool,
    /// Affected task id, when one was resolved.
    pub task_id: Option<String>,
    /// Human-readable result for display.
    pub message: String,
}

impl BoardResponse {
    fn success(message: impl Into<String>, task_id: TaskId) -> Self {
        Self {
            ok: true,
            task_id: Some(task_id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            message: message.into(),
        }
    }
}

pub struct TaskBoard<R: TaskRepository, C: Clock> {
    service: TaskService<R, C>,
    query: TaskQuery,
}

impl<R: TaskRepository, C: Clock> TaskBoard<R, C> {
    pub fn new(service: TaskService<R, C>) -> Self {
        Self {
            service,
            query: TaskQuery::default(),
        }
    }

    pub fn set_filter(&mut self, status: StatusFilter) {
        self.query.status = status;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.search = term.into();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.query.sort = sort;
    }

    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.service.project(&self.query)
    }

    pub fn stats(&self) -> TaskStats {
        self.service.stats()
    }

    pub fn add(
        &mut self,
        title: &str,
        description: Option<&str>,
        priority: TaskPriority,
    ) -> BoardResponse {
        let request = NewTask {
            title: title.to_string(),
            description: description.map(str::to_string),
            priority,
        };
        respond("Task created.", self.service.add_task(&request))
    }

    pub fn advance(&mut self, id_text: &str) -> BoardResponse {
        match self.resolve_id(id_text) {
            Ok(id) => {
                let result = self.service.advance_status(id);
                let message = match &result {
                    Ok(Outcome::Applied(task)) => format!("Task moved to {}.", task.status),
                    _ => String::new(),
                };
                respond(message, result)
            }
            Err(message) => BoardResponse::failure(message),
        }
    }

    pub fn delete(&mut self, id_text: &str) -> BoardResponse {
        match self.resolve_id(id_text) {
            Ok(id) => respond("Task deleted.", self.service.delete_task(id)),
            Err(message) => BoardResponse::failure(message),
        }
    }

    pub fn edit(&mut self, id_text: &str, patch: &TaskPatch) -> BoardResponse {
        match self.resolve_id(id_text) {
            Ok(id) => respond("Task updated.", self.service.update_task(id, patch)),
            Err(message) => BoardResponse::failure(message),
        }
    }

    /// Accepts a full UUID or a prefix matching exactly one task.
    fn resolve_id(&self, id_text: &str) -> Result<TaskId, String> {
        let trimmed = id_text.trim();
        if let Ok(id) = Uuid::parse_str(trimmed) {
            return Ok(id);
        }
        if trimmed.is_empty() {
            return Err("task id must not be empty".to_string());
        }

        let needle = trimmed.to_ascii_lowercase();
        let mut matches = self
            .service
            .tasks()
            .iter()
            .filter(|task| task.id.to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(task), None) => Ok(task.id),
            (None, _) => Err(format!("task not found: {trimmed}")),
            (Some(_), Some(_)) => Err(format!("task id prefix `{trimmed}` is ambiguous")),
        }
    }
}

fn respond(
    message: impl Into<String>,
    result: tasktrack_core::ServiceResult<Outcome<Task>>,
) -> BoardResponse {
    match result {
        Ok(Outcome::Applied(task)) => BoardResponse::success(message, task.id),
        Ok(Outcome::Rejected(reason)) => BoardResponse::failure(format!("Declined: {reason}.")),
        Err(err) => {
            warn!("event=board_intent module=cli status=error error={err}");
            BoardResponse::failure(format!("Not saved: {err}."))
        }
    }
}
