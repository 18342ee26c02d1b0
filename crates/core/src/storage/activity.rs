//! Activity log backed by `logs.json`.
//!
//! Entries are appended in chronological order and the file is capped at
//! [`config::MAX_LOG_ENTRIES`], oldest dropped first.

use crate::config;
use crate::storage::persistence::{load_json, write_json_atomic};
use crate::storage::{timestamp_now, ReadPolicy, StoreError};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One recorded action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: String,
    pub action: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub details: Map<String, Value>,
}

#[derive(Debug, Clone)]
pub struct ActivityLog {
    path: PathBuf,
    policy: ReadPolicy,
    write_lock: Arc<Mutex<()>>,
}

impl ActivityLog {
    pub fn new(path: impl Into<PathBuf>, policy: ReadPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an entry stamped with the current local time.
    ///
    /// Under [`ReadPolicy::FailOpen`] an unreadable log is started afresh.
    pub fn append(
        &self,
        action: &str,
        user: Option<&str>,
        details: Map<String, Value>,
    ) -> Result<ActivityEntry, StoreError> {
        let entry = ActivityEntry {
            timestamp: timestamp_now(),
            action: action.to_string(),
            user: user.map(str::to_string),
            details,
        };

        let _guard = self.write_lock.lock();
        let mut entries: Vec<ActivityEntry> = load_json(&self.path, self.policy)?;
        entries.push(entry.clone());
        if entries.len() > config::MAX_LOG_ENTRIES {
            let excess = entries.len() - config::MAX_LOG_ENTRIES;
            entries.drain(..excess);
        }
        write_json_atomic(&self.path, &entries)?;
        Ok(entry)
    }

    /// Entries in chronological order; with `limit`, only the newest `limit`.
    pub fn list(&self, limit: Option<usize>) -> Result<Vec<ActivityEntry>, StoreError> {
        let mut entries: Vec<ActivityEntry> = load_json(&self.path, self.policy)?;
        if let Some(limit) = limit {
            let skip = entries.len().saturating_sub(limit);
            entries.drain(..skip);
        }
        Ok(entries)
    }
}
