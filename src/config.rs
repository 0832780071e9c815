use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::{files, limits};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub storage: StorageConfig,

    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Fallback `tracing` filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding every JSON document.
    pub data_dir: String,

    pub users_file: String,

    /// Per-user settings map.
    pub settings_file: String,

    /// Single snapshot of the last-saved settings form.
    pub local_settings_file: String,

    pub assignments_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            users_file: files::USERS.to_string(),
            settings_file: files::USERS_SETTINGS.to_string(),
            local_settings_file: files::LOCAL_SETTINGS.to_string(),
            assignments_file: files::ASSIGNMENTS.to_string(),
        }
    }
}

impl StorageConfig {
    #[must_use]
    pub fn with_data_dir(data_dir: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    fn file_names(&self) -> [&str; 4] {
        [
            self.users_file.as_str(),
            self.settings_file.as_str(),
            self.local_settings_file.as_str(),
            self.assignments_file.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub min_password_length: usize,

    pub max_field_length: usize,

    pub max_username_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_password_length: 1,
            max_field_length: limits::MAX_FIELD_LEN,
            max_username_length: limits::MAX_USERNAME_LEN,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("assignment-tracker").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".assignment-tracker").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        let names = self.storage.file_names();

        if names.iter().any(|n| n.trim().is_empty()) {
            anyhow::bail!("Storage file names cannot be empty");
        }

        for (i, a) in names.iter().enumerate() {
            if names[i + 1..].contains(a) {
                anyhow::bail!("Storage file name '{a}' is used for more than one document");
            }
        }

        if self.validation.max_field_length == 0 || self.validation.max_username_length == 0 {
            anyhow::bail!("Validation length limits must be > 0");
        }

        Ok(())
    }
}
