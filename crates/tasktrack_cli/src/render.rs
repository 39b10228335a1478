//! Plain-text rendering of projections and counts.

use std::fmt::Write;
use tasktrack_core::{Task, TaskPriority, TaskStats, TaskStatus};

pub const EMPTY_LIST_MESSAGE: &str = "No tasks found. Start by creating a new task!";
const SHORT_ID_LEN: usize = 8;

pub fn render_task_list(tasks: &[&Task]) -> String {
    if tasks.is_empty() {
        return format!("{EMPTY_LIST_MESSAGE}\n");
    }

    let mut out = String::new();
    for task in tasks {
        out.push_str(&render_task_row(task));
    }
    out
}

/// One row per task, plus an indented description line when present.
pub fn render_task_row(task: &Task) -> String {
    let id = task.id.to_string();
    let mut row = format!(
        "{} {:<11} {} {}  {}\n",
        &id[..SHORT_ID_LEN],
        status_badge(task.status),
        priority_marker(task.priority),
        task.title,
        task.created_at.format("%Y-%m-%d"),
    );
    if let Some(description) = task.description.as_deref() {
        let _ = writeln!(row, "         {description}");
    }
    row
}

pub fn render_stats(stats: &TaskStats) -> String {
    let rows = [
        (status_label(TaskStatus::Todo), stats.todo),
        (status_label(TaskStatus::InProgress), stats.in_progress),
        (status_label(TaskStatus::Done), stats.done),
        ("Total", stats.total),
    ];
    rows.iter().fold(String::new(), |mut out, (label, count)| {
        let _ = writeln!(out, "{label:<12} {count}");
        out
    })
}

pub fn status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "To Do",
        TaskStatus::InProgress => "In Progress",
        TaskStatus::Done => "Completed",
    }
}

fn status_badge(status: TaskStatus) -> String {
    format!("[{status}]")
}

fn priority_marker(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::High => "!!!",
        TaskPriority::Medium => " !!",
        TaskPriority::Low => "  !",
    }
}
