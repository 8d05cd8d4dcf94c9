//! Goal file location configuration.
//!
//! # Responsibility
//! - Describe where the persisted goal collection lives.
//! - Validate the location before any filesystem access happens.
//!
//! # Invariants
//! - `data_dir` is absolute; the core never resolves paths against the
//!   process working directory.
//! - `file_name` is a bare file name without path separators.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Default resource name inside the application-private data directory.
pub const DEFAULT_GOALS_FILE_NAME: &str = "Goals.json";

/// Location of the persisted goal collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub file_name: String,
}

/// Invalid store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyDataDir,
    RelativeDataDir(PathBuf),
    InvalidFileName(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDataDir => write!(f, "data_dir cannot be empty"),
            Self::RelativeDataDir(path) => write!(
                f,
                "data_dir must be an absolute path, got `{}`",
                path.display()
            ),
            Self::InvalidFileName(name) => {
                write!(f, "file_name must be a bare file name, got `{name}`")
            }
        }
    }
}

impl Error for ConfigError {}

impl StoreConfig {
    /// Uses `DEFAULT_GOALS_FILE_NAME` inside `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            file_name: DEFAULT_GOALS_FILE_NAME.to_string(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Checks directory and file-name invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDataDir);
        }
        if !self.data_dir.is_absolute() {
            return Err(ConfigError::RelativeDataDir(self.data_dir.clone()));
        }

        let name = self.file_name.trim();
        let is_bare = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\'])
            && Path::new(name).file_name().is_some();
        if !is_bare {
            return Err(ConfigError::InvalidFileName(self.file_name.clone()));
        }

        Ok(())
    }

    /// Full path of the goal file.
    pub fn file_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}
