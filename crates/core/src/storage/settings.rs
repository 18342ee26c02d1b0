//! Site settings backed by `admin_settings.json`.

use crate::storage::persistence::{read_json, recover, write_json_atomic};
use crate::storage::{ReadPolicy, StoreError};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Site-wide settings. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub site_title: String,
    pub theme: String,
    pub notifications_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_title: "Medicinal Plants DB".to_string(),
            theme: "default".to_string(),
            notifications_enabled: true,
        }
    }
}

/// Partial settings update; absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsPatch {
    pub site_title: Option<String>,
    pub theme: Option<String>,
    pub notifications_enabled: Option<bool>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.site_title.is_none() && self.theme.is_none() && self.notifications_enabled.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    policy: ReadPolicy,
    write_lock: Arc<Mutex<()>>,
}

impl SettingsStore {
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

    /// Current settings. A missing file is created with the defaults.
    pub fn load(&self) -> Result<Settings, StoreError> {
        match read_json(&self.path) {
            Ok(Some(settings)) => Ok(settings),
            Ok(None) => self.init_defaults(),
            Err(e) => recover(&self.path, self.policy, e),
        }
    }

    /// Writes the defaults unless another writer created the file first.
    fn init_defaults(&self) -> Result<Settings, StoreError> {
        let _guard = self.write_lock.lock();
        match read_json(&self.path) {
            Ok(Some(settings)) => Ok(settings),
            Ok(None) => {
                let settings = Settings::default();
                write_json_atomic(&self.path, &settings)?;
                tracing::info!(path = %self.path.display(), "Wrote default settings");
                Ok(settings)
            }
            Err(e) => recover(&self.path, self.policy, e),
        }
    }

    /// Merge `patch` into the current settings and persist the result.
    pub fn update(&self, patch: SettingsPatch) -> Result<Settings, StoreError> {
        let _guard = self.write_lock.lock();
        let mut settings: Settings = match read_json(&self.path) {
            Ok(found) => found.unwrap_or_default(),
            Err(e) => recover(&self.path, self.policy, e)?,
        };
        if let Some(title) = patch.site_title {
            settings.site_title = title;
        }
        if let Some(theme) = patch.theme {
            settings.theme = theme;
        }
        if let Some(enabled) = patch.notifications_enabled {
            settings.notifications_enabled = enabled;
        }
        write_json_atomic(&self.path, &settings)?;
        Ok(settings)
    }
}
