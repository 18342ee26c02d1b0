//! Storage layer: flat JSON files for plants, settings and the activity log.
//!
//! Every read goes to disk; nothing is cached between calls. Each file has its
//! own process-wide mutex that serializes read-modify-write cycles, and every
//! write goes through a temp file plus atomic rename so concurrent readers
//! never observe a partially written file.

/// Append-only (capped) activity log.
pub mod activity;
/// The plant collection: reads and mutations of `plants.json`.
pub mod catalog;
/// JSON read/write helpers with atomic writes.
pub mod persistence;
/// Site settings with defaults.
pub mod settings;

pub use activity::{ActivityEntry, ActivityLog};
pub use catalog::PlantCatalog;
pub use persistence::{load_json, read_json, write_json_atomic};
pub use settings::{Settings, SettingsPatch, SettingsStore};

use crate::config;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Storage error.
#[derive(Debug)]
pub enum StoreError {
    /// No record matched.
    NotFound(String),
    /// A backing file exists but does not parse.
    Corrupt(String),
    /// Filesystem failure.
    Io(io::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(msg) => write!(f, "{}", msg),
            StoreError::Corrupt(msg) => write!(f, "corrupt store: {}", msg),
            StoreError::Io(e) => write!(f, "storage I/O error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// What reads do when a backing file is unreadable or corrupt.
///
/// A missing file is always an empty store. Mutations of the plant catalog
/// ignore the policy and refuse to overwrite a corrupt file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadPolicy {
    /// Log a warning and continue with an empty/default value.
    #[default]
    FailOpen,
    /// Return the error to the caller.
    FailClosed,
}

impl ReadPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadPolicy::FailOpen => "fail-open",
            ReadPolicy::FailClosed => "fail-closed",
        }
    }
}

impl FromStr for ReadPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail-open" | "open" => Ok(ReadPolicy::FailOpen),
            "fail-closed" | "closed" => Ok(ReadPolicy::FailClosed),
            other => Err(format!(
                "unknown read policy '{}', expected 'fail-open' or 'fail-closed'",
                other
            )),
        }
    }
}

impl fmt::Display for ReadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All stores rooted at one data directory.
#[derive(Debug, Clone)]
pub struct Storage {
    pub catalog: PlantCatalog,
    pub activity: ActivityLog,
    pub settings: SettingsStore,
    data_dir: PathBuf,
}

impl Storage {
    /// Opens the stores under `data_dir`. Files are created lazily on first write.
    pub fn open(data_dir: impl AsRef<Path>, policy: ReadPolicy) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            catalog: PlantCatalog::new(data_dir.join(config::PLANTS_FILE), policy),
            activity: ActivityLog::new(data_dir.join(config::LOG_FILE), policy),
            settings: SettingsStore::new(data_dir.join(config::SETTINGS_FILE), policy),
            data_dir,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Local time in ISO-8601 with microseconds, the format used for log and moderation stamps.
pub(crate) fn timestamp_now() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}
