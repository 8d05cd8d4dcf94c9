//! Goal persistence gateway contract and JSON file implementation.
//!
//! # Responsibility
//! - Load and save the whole ordered goal collection, logs included.
//! - Map filesystem and decoding failures to distinguishable error kinds.
//!
//! # Invariants
//! - Saves replace the target file atomically: a failed save leaves the
//!   previous file readable and unchanged.
//! - Loads reject malformed content instead of returning partial data.
//! - Unknown fields in persisted records are ignored.
//! - Log events carry counts and durations only, never goal names or units.

use crate::config::{ConfigError, StoreConfig};
use crate::model::goal::Goal;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence gateway error.
#[derive(Debug)]
pub enum RepoError {
    /// No goal file yet. Callers treat this as a first run.
    ResourceMissing(PathBuf),
    /// The file exists but could not be read.
    Read { path: PathBuf, source: io::Error },
    /// The file content is not a valid goal collection.
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The collection holds values that cannot be stored faithfully.
    Encode(String),
    /// Writing or replacing the file failed; the prior file is intact.
    StorageWrite { path: PathBuf, source: io::Error },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ResourceMissing(path) => {
                write!(f, "goal file not found: {}", path.display())
            }
            Self::Read { path, source } => {
                write!(f, "failed to read goal file `{}`: {source}", path.display())
            }
            Self::Decode { path, source } => {
                write!(f, "malformed goal file `{}`: {source}", path.display())
            }
            Self::Encode(message) => write!(f, "cannot encode goals: {message}"),
            Self::StorageWrite { path, source } => {
                write!(f, "failed to write goal file `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
            Self::StorageWrite { source, .. } => Some(source),
            Self::ResourceMissing(_) | Self::Encode(_) => None,
        }
    }
}

/// Whole-collection load/save contract.
pub trait GoalRepository {
    fn load(&self) -> RepoResult<Vec<Goal>>;
    fn save(&self, goals: &[Goal]) -> RepoResult<()>;
}

impl<R: GoalRepository + ?Sized> GoalRepository for &R {
    fn load(&self) -> RepoResult<Vec<Goal>> {
        (**self).load()
    }

    fn save(&self, goals: &[Goal]) -> RepoResult<()> {
        (**self).save(goals)
    }
}

/// Goal collection stored as one pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileGoalRepository {
    path: PathBuf,
}

impl JsonFileGoalRepository {
    /// Validates `config`; does not touch the filesystem.
    pub fn new(config: StoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            path: config.file_path(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomically(&self, bytes: &[u8]) -> io::Result<()> {
        let dir = self.path.parent().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "goal file has no parent directory")
        })?;
        fs::create_dir_all(dir)?;

        // Same directory as the target so `persist` is a rename, not a copy.
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(bytes)?;
        staged.as_file().sync_all()?;
        staged.persist(&self.path).map_err(|err| err.error)?;
        sync_dir(dir)
    }
}

/// Flushes the directory entry so a completed rename survives a crash.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

impl GoalRepository for JsonFileGoalRepository {
    fn load(&self) -> RepoResult<Vec<Goal>> {
        let started_at = Instant::now();

        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("event=goals_load module=repo status=missing");
                return Err(RepoError::ResourceMissing(self.path.clone()));
            }
            Err(err) => {
                error!(
                    "event=goals_load module=repo status=error error_code=read_failed error={}",
                    err
                );
                return Err(RepoError::Read {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };

        match serde_json::from_slice::<Vec<Goal>>(&bytes) {
            Ok(goals) => {
                info!(
                    "event=goals_load module=repo status=ok goals={} bytes={} duration_ms={}",
                    goals.len(),
                    bytes.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(goals)
            }
            Err(err) => {
                error!(
                    "event=goals_load module=repo status=error error_code=decode_failed line={} column={}",
                    err.line(),
                    err.column()
                );
                Err(RepoError::Decode {
                    path: self.path.clone(),
                    source: err,
                })
            }
        }
    }

    fn save(&self, goals: &[Goal]) -> RepoResult<()> {
        let started_at = Instant::now();

        // serde_json writes non-finite floats as `null`, which would not load
        // back; refuse them up front.
        if let Some(goal) = goals.iter().find(|goal| !is_finite_goal(goal)) {
            warn!(
                "event=goals_save module=repo status=error error_code=non_finite goal_id={}",
                goal.id()
            );
            return Err(RepoError::Encode(format!(
                "goal {} contains a non-finite amount",
                goal.id()
            )));
        }

        let bytes =
            serde_json::to_vec_pretty(goals).map_err(|err| RepoError::Encode(err.to_string()))?;

        match self.write_atomically(&bytes) {
            Ok(()) => {
                info!(
                    "event=goals_save module=repo status=ok goals={} bytes={} duration_ms={}",
                    goals.len(),
                    bytes.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=goals_save module=repo status=error error_code=write_failed duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(RepoError::StorageWrite {
                    path: self.path.clone(),
                    source: err,
                })
            }
        }
    }
}

fn is_finite_goal(goal: &Goal) -> bool {
    goal.goal_amount.is_finite()
        && goal.quick_add.is_finite()
        && goal.current_amount().is_finite()
        && goal
            .logs()
            .iter()
            .all(|entry| entry.amount_changed().is_finite())
}
