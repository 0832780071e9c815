//! Domain service for a user's assignments.
//!
//! Validates input before touching the store; every successful call has
//! already been written to disk when it returns.

use thiserror::Error;
use uuid::Uuid;

use crate::models::{Assignment, AssignmentInput, AssignmentPatch};
use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum AssignmentError {
    #[error("Assignment not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<anyhow::Error> for AssignmentError {
    fn from(err: anyhow::Error) -> Self {
        Self::Storage(format!("{err:#}"))
    }
}

impl From<ValidationError> for AssignmentError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.0)
    }
}

pub trait AssignmentService: Send + Sync {
    /// The user's assignments in insertion order.
    fn list(&self, username: &str) -> Vec<Assignment>;

    /// Validates and stores a new assignment. A record with the same title
    /// is replaced.
    fn add(&self, username: &str, input: AssignmentInput) -> Result<Assignment, AssignmentError>;

    /// Applies `patch` to the assignment with `id`. Renaming moves the
    /// record to its new title and keeps the id.
    fn edit(
        &self,
        username: &str,
        id: Uuid,
        patch: AssignmentPatch,
    ) -> Result<Assignment, AssignmentError>;

    /// Returns whether the assignment existed.
    fn delete(&self, username: &str, id: Uuid) -> Result<bool, AssignmentError>;

    fn set_completed(
        &self,
        username: &str,
        id: Uuid,
        completed: bool,
    ) -> Result<Assignment, AssignmentError> {
        self.edit(username, id, AssignmentPatch::completed(completed))
    }

    fn set_priority(
        &self,
        username: &str,
        id: Uuid,
        priority: bool,
    ) -> Result<Assignment, AssignmentError> {
        self.edit(username, id, AssignmentPatch::priority(priority))
    }
}
