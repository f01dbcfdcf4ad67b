//! Runtime configuration resolved from the process environment.
//!
//! Recognized variables:
//! - `NOTETAKER_STORAGE_KEY`: storage key for the note list (default `notes`).
//! - `NOTETAKER_DB_PATH`: SQLite file (default `<temp_dir>/notetaker.sqlite3`).
//! - `NOTETAKER_LOG_LEVEL`: `trace|debug|info|warn|error` (default by build mode).
//! - `NOTETAKER_LOG_DIR`: absolute directory for rolling logs (unset = no file logs).
//!
//! Blank values fall back to the defaults.

use crate::logging::{default_log_level, normalize_level};
use crate::service::note_controller::DEFAULT_STORAGE_KEY;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_STORAGE_KEY: &str = "NOTETAKER_STORAGE_KEY";
pub const ENV_DB_PATH: &str = "NOTETAKER_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "NOTETAKER_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "NOTETAKER_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "notetaker.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidStorageKey(String),
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStorageKey(value) => {
                write!(f, "storage key must not contain whitespace: `{value}`")
            }
            Self::InvalidLogLevel(value) => write!(f, "unsupported log level `{value}`"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved settings for one host process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesConfig {
    pub storage_key: String,
    pub db_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: Option<PathBuf>,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            db_path: default_db_path(),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl NotesConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(key) = read(ENV_STORAGE_KEY) {
            if key.chars().any(char::is_whitespace) {
                return Err(ConfigError::InvalidStorageKey(key));
            }
            config.storage_key = key;
        }
        if let Some(path) = read(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level =
                normalize_level(&level).map_err(|_| ConfigError::InvalidLogLevel(level))?;
        }
        config.log_dir = read(ENV_LOG_DIR).map(PathBuf::from);

        Ok(config)
    }
}

fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, NotesConfig, ENV_DB_PATH, ENV_LOG_LEVEL, ENV_STORAGE_KEY};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| values.get(name).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = NotesConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, NotesConfig::default());
        assert_eq!(config.storage_key, "notes");
        assert!(config.db_path.ends_with("notetaker.sqlite3"));
    }

    #[test]
    fn overrides_are_trimmed_and_blank_values_ignored() {
        let config = NotesConfig::from_lookup(lookup_from(&[
            (ENV_STORAGE_KEY, "  "),
            (ENV_DB_PATH, " /tmp/n.db "),
            (ENV_LOG_LEVEL, "WARNING"),
        ]))
        .unwrap();
        assert_eq!(config.storage_key, "notes");
        assert_eq!(config.db_path, PathBuf::from("/tmp/n.db"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = NotesConfig::from_lookup(lookup_from(&[(ENV_STORAGE_KEY, "my notes")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidStorageKey("my notes".to_string()));

        let err =
            NotesConfig::from_lookup(lookup_from(&[(ENV_LOG_LEVEL, "loud")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidLogLevel("loud".to_string()));
    }
}
