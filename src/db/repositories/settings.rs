use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::db::document;
use crate::models::{SettingsMap, SettingsRecord};

/// Per-user settings (`users_settings.json`) plus the single last-saved
/// snapshot of the settings form (`user_settings.json`).
///
/// The two files are deliberately separate documents.
pub struct SettingsRepository {
    path: PathBuf,
    snapshot_path: PathBuf,
}

impl SettingsRepository {
    pub fn new(path: impl Into<PathBuf>, snapshot_path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            snapshot_path: snapshot_path.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    #[must_use]
    pub fn load(&self) -> SettingsMap {
        document::load_or_default(&self.path)
    }

    pub fn save(&self, settings: &SettingsMap) -> Result<()> {
        document::save(&self.path, settings).context("Failed to save user settings")
    }

    #[must_use]
    pub fn get(&self, username: &str) -> Option<SettingsRecord> {
        self.load().remove(username)
    }

    /// Insert or replace the record stored under `record.username`.
    pub fn upsert(&self, record: SettingsRecord) -> Result<()> {
        let mut settings = self.load();
        debug!("Saving settings for {}", record.username);
        settings.insert(record.username.clone(), record);
        self.save(&settings)
    }

    pub fn remove(&self, username: &str) -> Result<bool> {
        let mut settings = self.load();
        if settings.remove(username).is_none() {
            return Ok(false);
        }
        self.save(&settings)?;
        Ok(true)
    }

    /// The last settings form that was saved, if any.
    #[must_use]
    pub fn load_snapshot(&self) -> Option<SettingsRecord> {
        let snapshot: Option<SettingsRecord> = document::load_or_default(&self.snapshot_path);
        snapshot.filter(|s| !s.username.is_empty())
    }

    pub fn save_snapshot(&self, record: &SettingsRecord) -> Result<()> {
        document::save(&self.snapshot_path, record).context("Failed to save local settings")
    }
}
