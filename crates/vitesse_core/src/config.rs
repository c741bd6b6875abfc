//! Core configuration.
//!
//! # Responsibility
//! - Describe where the candidate database lives and whether demo data is seeded.
//! - Carry optional logging settings for hosts that bootstrap logging from config.
//!
//! # Invariants
//! - A missing `db_path` means an in-memory database.
//! - Unknown JSON keys are rejected so typos do not silently fall back to defaults.

use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Runtime configuration for opening a [`crate::CandidateStore`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    /// SQLite file path. `None` opens an in-memory database.
    pub db_path: Option<PathBuf>,
    /// Seed the demonstration candidates when the schema is created.
    pub seed_demo_data: bool,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            seed_demo_data: true,
            log_level: None,
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// In-memory database without demo data; the test configuration.
    pub fn in_memory() -> Self {
        Self {
            seed_demo_data: false,
            ..Self::default()
        }
    }

    /// File-backed configuration with default seeding.
    pub fn with_db_path(path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Parses a JSON configuration document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(ConfigError::Parse)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Configured log level, or the build-mode default.
    pub fn effective_log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig};
    use std::path::PathBuf;

    #[test]
    fn empty_document_uses_defaults() {
        let config = CoreConfig::from_json_str("{}").expect("empty object should parse");
        assert_eq!(config, CoreConfig::default());
        assert!(config.seed_demo_data);
        assert!(config.db_path.is_none());
    }

    #[test]
    fn parses_all_fields() {
        let config = CoreConfig::from_json_str(
            r#"{
                "db_path": "/tmp/vitesse.sqlite3",
                "seed_demo_data": false,
                "log_level": "warn",
                "log_dir": "/tmp/vitesse-logs"
            }"#,
        )
        .expect("full config should parse");
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/vitesse.sqlite3")));
        assert!(!config.seed_demo_data);
        assert_eq!(config.effective_log_level(), "warn");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = CoreConfig::from_json_str(r#"{"seed_demo": false}"#)
            .expect_err("unknown key should fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn in_memory_config_disables_seeding() {
        let config = CoreConfig::in_memory();
        assert!(!config.seed_demo_data);
        assert!(config.db_path.is_none());
    }
}
