//! JSON persistence helpers.
//!
//! Files are pretty-printed JSON. Writes use atomic temp-file + rename to
//! prevent readers from seeing a partially written file and to survive a crash
//! mid-write.

use crate::storage::{ReadPolicy, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Read and parse a JSON file. Returns `Ok(None)` if the file does not exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::Io(e)),
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| StoreError::Corrupt(format!("{}: {}", path.display(), e)))
}

/// Read a JSON file, substituting `T::default()` for a missing file and
/// applying `policy` to unreadable or corrupt files.
pub fn load_json<T>(path: &Path, policy: ReadPolicy) -> Result<T, StoreError>
where
    T: DeserializeOwned + Default,
{
    match read_json(path) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Ok(T::default()),
        Err(e) => recover(path, policy, e),
    }
}

/// Apply the read policy to a failed read.
pub(crate) fn recover<T: Default>(
    path: &Path,
    policy: ReadPolicy,
    err: StoreError,
) -> Result<T, StoreError> {
    match policy {
        ReadPolicy::FailOpen => {
            tracing::warn!(path = %path.display(), error = %err, "Store unreadable, serving empty data");
            Ok(T::default())
        }
        ReadPolicy::FailClosed => {
            tracing::error!(path = %path.display(), error = %err, "Store unreadable");
            Err(err)
        }
    }
}

/// Serialize `value` and atomically replace `path` with it.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> io::Result<()> {
    let bytes = serde_json::to_vec_pretty(value).map_err(io::Error::other)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let tmp_path = tmp_path_for(path);

    // Atomic write: write to temp, then rename
    fs::write(&tmp_path, &bytes)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote JSON store");
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
