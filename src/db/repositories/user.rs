use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::db::document;
use crate::models::{UserMap, UserRecord};

/// `users.json`: username → profile.
pub struct UserRepository {
    path: PathBuf,
}

impl UserRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Never fails; a missing or corrupt file reads as no users.
    #[must_use]
    pub fn load(&self) -> UserMap {
        document::load_or_default(&self.path)
    }

    pub fn save(&self, users: &UserMap) -> Result<()> {
        document::save(&self.path, users).context("Failed to save users")
    }

    /// Get user by username
    #[must_use]
    pub fn get(&self, username: &str) -> Option<UserRecord> {
        self.load().remove(username)
    }

    #[must_use]
    pub fn exists(&self, username: &str) -> bool {
        self.load().contains_key(username)
    }

    /// Insert or overwrite a user.
    pub fn insert(&self, username: &str, record: UserRecord) -> Result<()> {
        let mut users = self.load();
        users.insert(username.to_string(), record);
        self.save(&users)?;
        info!("Saved user {}", username);
        Ok(())
    }

    /// Returns `false` when the user does not exist; nothing is written then.
    pub fn update_password(&self, username: &str, new_password: &str) -> Result<bool> {
        let mut users = self.load();
        let Some(record) = users.get_mut(username) else {
            return Ok(false);
        };

        record.password = new_password.to_string();
        self.save(&users)?;
        debug!("Password updated for {}", username);
        Ok(true)
    }

    pub fn remove(&self, username: &str) -> Result<bool> {
        let mut users = self.load();
        if users.remove(username).is_none() {
            return Ok(false);
        }

        self.save(&users)?;
        info!("Removed user {}", username);
        Ok(true)
    }
}
