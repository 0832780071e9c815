use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::db::document;
use crate::models::{Assignment, AssignmentMap, AssignmentPatch};

/// `assignments.json`: username → `{assignments: title → record}`.
///
/// Every mutation is a whole-document read-modify-write.
pub struct AssignmentRepository {
    path: PathBuf,
}

impl AssignmentRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document. Never writes: records from older files get
    /// their missing fields filled in memory only.
    #[must_use]
    pub fn load(&self) -> AssignmentMap {
        let mut all: AssignmentMap = document::load_or_default(&self.path);
        for (username, user) in &mut all {
            user.backfill(username);
        }
        all
    }

    pub fn save(&self, assignments: &AssignmentMap) -> Result<()> {
        document::save(&self.path, assignments).context("Failed to save assignments")
    }

    /// The user's assignments in insertion order; empty for unknown users.
    #[must_use]
    pub fn list_for(&self, username: &str) -> Vec<Assignment> {
        self.load()
            .get(username)
            .map(|user| user.ordered())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn get(&self, username: &str, title: &str) -> Option<Assignment> {
        self.load()
            .remove(username)
            .and_then(|mut user| user.assignments.shift_remove(title))
    }

    /// Append by title, silently replacing an existing record with that
    /// title. The replacement moves to the end.
    pub fn add_assignment(&self, username: &str, assignment: Assignment) -> Result<()> {
        let mut all = self.load();
        let user = all.entry(username.to_string()).or_default();

        if user.assignments.shift_remove(&assignment.title).is_some() {
            debug!(
                "Overwriting assignment '{}' for {}",
                assignment.title, username
            );
        }
        let title = assignment.title.clone();
        user.assignments.insert(title.clone(), assignment);

        self.save(&all)?;
        info!("Added assignment '{}' for {}", title, username);
        Ok(())
    }

    /// Returns whether `title` existed. Nothing is written when it did not.
    /// A user left with no assignments is dropped from the document.
    pub fn delete_assignment(&self, username: &str, title: &str) -> Result<bool> {
        let mut all = self.load();
        let Some(user) = all.get_mut(username) else {
            return Ok(false);
        };
        if user.assignments.shift_remove(title).is_none() {
            return Ok(false);
        }
        if user.assignments.is_empty() {
            all.remove(username);
        }

        self.save(&all)?;
        info!("Deleted assignment '{}' for {}", title, username);
        Ok(true)
    }

    /// Apply `patch` to the record stored under the key `title`.
    ///
    /// A patch that renames the record moves it to the new title key in the
    /// same position, replacing whatever was stored there. Without a rename
    /// the key is left alone. Returns whether `title` existed.
    pub fn update_assignment(
        &self,
        username: &str,
        title: &str,
        patch: AssignmentPatch,
    ) -> Result<bool> {
        let mut all = self.load();
        let Some(user) = all.get_mut(username) else {
            return Ok(false);
        };
        let Some((mut index, _, mut assignment)) = user.assignments.shift_remove_full(title) else {
            return Ok(false);
        };

        let renamed = patch.title.is_some();
        assignment.apply(patch);

        let key = if renamed && assignment.title != title {
            debug!(
                "Renaming assignment '{}' -> '{}' for {}",
                title, assignment.title, username
            );
            if let Some((other, _, _)) = user.assignments.shift_remove_full(&assignment.title)
                && other < index
            {
                index -= 1;
            }
            assignment.title.clone()
        } else {
            title.to_string()
        };
        user.assignments.shift_insert(index, key, assignment);

        self.save(&all)?;
        Ok(true)
    }

    /// Drop a user's whole collection. Returns whether there was one.
    pub fn remove_user(&self, username: &str) -> Result<bool> {
        let mut all = self.load();
        if all.remove(username).is_none() {
            return Ok(false);
        }
        self.save(&all)?;
        info!("Removed all assignments for {}", username);
        Ok(true)
    }
}
