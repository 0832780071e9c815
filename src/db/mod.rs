use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::StorageConfig;

pub mod document;
pub mod repositories;

pub use repositories::{AssignmentRepository, SettingsRepository, UserRepository};

/// Owns the data directory and the names of the JSON documents in it.
///
/// Holds no cached data; each repository call reads the file it needs.
#[derive(Debug, Clone)]
pub struct Store {
    data_dir: PathBuf,
    files: StorageConfig,
}

impl Store {
    #[must_use]
    pub fn from_config(storage: &StorageConfig) -> Self {
        Self {
            data_dir: PathBuf::from(&storage.data_dir),
            files: storage.clone(),
        }
    }

    /// Create the data directory if needed.
    pub fn open(storage: &StorageConfig) -> Result<Self> {
        let store = Self::from_config(storage);
        std::fs::create_dir_all(&store.data_dir).with_context(|| {
            format!("Failed to create data directory {}", store.data_dir.display())
        })?;
        info!("Using data directory {}", store.data_dir.display());
        Ok(store)
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn file(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    #[must_use]
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.file(&self.files.users_file))
    }

    #[must_use]
    pub fn settings(&self) -> SettingsRepository {
        SettingsRepository::new(
            self.file(&self.files.settings_file),
            self.file(&self.files.local_settings_file),
        )
    }

    #[must_use]
    pub fn assignments(&self) -> AssignmentRepository {
        AssignmentRepository::new(self.file(&self.files.assignments_file))
    }
}
