//! Command-line surface.

use crate::config::ConfigOverrides;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tasktrack_core::{SortKey, StatusFilter, TaskPatch, TaskPriority};

#[derive(Debug, Parser)]
#[command(
    name = "tasktrack",
    version,
    about = "Track tasks through todo, in-progress and done"
)]
pub struct Cli {
    /// SQLite file holding saved tasks [env: TASKTRACK_DB_PATH]
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,
    /// Absolute directory for rolling log files [env: TASKTRACK_LOG_DIR]
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<String>,
    /// trace|debug|info|warn|error [env: TASKTRACK_LOG_LEVEL]
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            db_path: self.db.clone(),
            log_dir: self.log_dir.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a task in `todo`
    Add {
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long, default_value_t = TaskPriority::Medium)]
        priority: TaskPriority,
    },
    /// Move a task to its next status
    Advance { id: String },
    /// Remove a task
    Delete { id: String },
    /// Change title, description or priority
    Edit {
        id: String,
        #[command(flatten)]
        fields: EditFields,
    },
    /// Show tasks matching the view parameters
    List(ListArgs),
    /// Show counts per status
    Stats,
    /// Print the core version
    Version,
}

#[derive(Debug, Args)]
pub struct EditFields {
    #[arg(long)]
    pub title: Option<String>,
    /// Pass an empty string to clear
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub priority: Option<TaskPriority>,
}

impl EditFields {
    pub fn into_patch(self) -> TaskPatch {
        TaskPatch {
            title: self.title,
            description: self.description,
            priority: self.priority,
        }
    }
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// all|todo|in-progress|done
    #[arg(long, default_value_t = StatusFilter::All)]
    pub status: StatusFilter,
    /// Case-insensitive title substring
    #[arg(long, default_value = "")]
    pub search: String,
    /// created-at|priority
    #[arg(long, default_value_t = SortKey::CreatedAt)]
    pub sort: SortKey,
}
