//! JSON-file settings persistence
//!
//! The whole store snapshot is written as pretty-printed JSON to
//! `settings.json` in the per-user config directory. Read-modify-write with a
//! single active editor assumed; concurrent editors are not guarded against.

use crate::constants::{APP_NAME, SETTINGS_FILE_NAME};
use crate::core::persist::{PersistedState, SettingsStore};
use crate::utils::StoreError;
use async_trait::async_trait;
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    /// Store backed by the per-user config directory
    pub fn new() -> Result<Self, StoreError> {
        let dirs = ProjectDirs::from("", "", APP_NAME).ok_or_else(|| {
            StoreError::Persistence("Could not determine config directory".to_string())
        })?;
        Ok(JsonSettingsStore {
            path: dirs.config_dir().join(SETTINGS_FILE_NAME),
        })
    }

    /// Store backed by an explicit file path (tests, portable mode)
    pub fn with_path(path: PathBuf) -> Self {
        JsonSettingsStore { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl SettingsStore for JsonSettingsStore {
    async fn load(&self) -> Result<PersistedState, StoreError> {
        if !self.path.exists() {
            return Ok(PersistedState::default());
        }

        let contents = fs::read_to_string(&self.path)
            .map_err(|e| StoreError::Persistence(format!("Failed to read settings: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| StoreError::Persistence(format!("Failed to parse settings: {}", e)))
    }

    async fn save(&self, state: &PersistedState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::Persistence(format!("Failed to create settings directory: {}", e))
            })?;
        }

        let contents = serde_json::to_string_pretty(state)
            .map_err(|e| StoreError::Persistence(format!("Failed to serialize settings: {}", e)))?;

        fs::write(&self.path, contents)
            .map_err(|e| StoreError::Persistence(format!("Failed to write settings: {}", e)))
    }
}
