//! Runtime configuration resolution.
//!
//! # Responsibility
//! - Merge command-line overrides, environment variables and defaults.
//!
//! # Invariants
//! - Precedence is flag > environment > default.
//! - Blank values count as unset at every level.

use std::path::PathBuf;
use tasktrack_core::default_log_level;

pub const DB_PATH_ENV: &str = "TASKTRACK_DB_PATH";
pub const LOG_DIR_ENV: &str = "TASKTRACK_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "TASKTRACK_LOG_LEVEL";
const DEFAULT_DB_FILE_NAME: &str = "tasktrack.sqlite3";

/// Values supplied on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub db_path: Option<PathBuf>,
    pub log_dir: Option<String>,
    pub log_level: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    /// Logging stays off when `None`.
    pub log_dir: Option<String>,
    pub log_level: String,
}

impl AppConfig {
    /// Resolves settings, reading environment variables through `env`.
    pub fn resolve(overrides: &ConfigOverrides, env: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |flag: Option<String>, key: &str| {
            non_blank(flag).or_else(|| non_blank(env(key)))
        };

        let db_path = non_blank(
            overrides
                .db_path
                .as_ref()
                .map(|path| path.to_string_lossy().into_owned()),
        )
        .or_else(|| non_blank(env(DB_PATH_ENV)))
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));

        Self {
            db_path,
            log_dir: lookup(overrides.log_dir.clone(), LOG_DIR_ENV),
            log_level: lookup(overrides.log_level.clone(), LOG_LEVEL_ENV)
                .unwrap_or_else(|| default_log_level().to_string()),
        }
    }

    /// Resolves against the process environment.
    pub fn from_env(overrides: &ConfigOverrides) -> Self {
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigOverrides, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use tasktrack_core::default_log_level;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_flags_or_env() {
        let config = AppConfig::resolve(&ConfigOverrides::default(), env_of(&[]));
        assert_eq!(config.db_path, std::env::temp_dir().join("tasktrack.sqlite3"));
        assert_eq!(config.log_dir, None);
        assert_eq!(config.log_level, default_log_level());
    }

    #[test]
    fn environment_fills_unset_flags() {
        let env = env_of(&[
            (DB_PATH_ENV, "/data/tasks.sqlite3"),
            (LOG_DIR_ENV, "/var/log/tasktrack"),
            (LOG_LEVEL_ENV, "warn"),
        ]);
        let config = AppConfig::resolve(&ConfigOverrides::default(), env);
        assert_eq!(config.db_path, PathBuf::from("/data/tasks.sqlite3"));
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/tasktrack"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn flags_win_over_environment_and_blank_values_are_ignored() {
        let env = env_of(&[(DB_PATH_ENV, "/data/env.sqlite3"), (LOG_LEVEL_ENV, "  ")]);
        let overrides = ConfigOverrides {
            db_path: Some(PathBuf::from("/data/flag.sqlite3")),
            log_dir: Some("   ".to_string()),
            log_level: None,
        };
        let config = AppConfig::resolve(&overrides, env);
        assert_eq!(config.db_path, PathBuf::from("/data/flag.sqlite3"));
        assert_eq!(config.log_dir, None);
        assert_eq!(config.log_level, default_log_level());
    }
}
