//! Store configuration.
//!
//! Loaded from an optional TOML file; every field has a default so a missing
//! key never fails. `HIPPOCAMPUS_DB` overrides the database path.

use crate::contract::DEFAULT_AUTHORITY;
use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

pub const DB_PATH_ENV: &str = "HIPPOCAMPUS_DB";
pub const DEFAULT_DB_FILE_NAME: &str = "hippo.db";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub authority: String,
    pub log_level: String,
    /// Absolute directory for rolling log files; logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            authority: DEFAULT_AUTHORITY.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl StoreConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(ConfigError::Parse)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Applies `HIPPOCAMPUS_DB` when it is set and non-blank.
    pub fn with_env_overrides(self) -> Self {
        let db_path = std::env::var(DB_PATH_ENV).ok();
        self.with_db_path_override(db_path.as_deref())
    }

    fn with_db_path_override(mut self, db_path: Option<&str>) -> Self {
        if let Some(path) = db_path.map(str::trim).filter(|path| !path.is_empty()) {
            self.db_path = PathBuf::from(path);
        }
        self
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}
