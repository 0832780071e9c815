//! JSON-file implementation of the `AssignmentService` trait.

use tracing::debug;
use uuid::Uuid;

use crate::config::ValidationConfig;
use crate::constants::DATE_FORMAT;
use crate::db::Store;
use crate::models::{Assignment, AssignmentInput, AssignmentPatch};
use crate::services::assignment_service::{AssignmentError, AssignmentService};
use crate::validation::{validate_due_date, validate_required};

pub struct JsonAssignmentService {
    store: Store,
    limits: ValidationConfig,
}

impl JsonAssignmentService {
    #[must_use]
    pub const fn new(store: Store, limits: ValidationConfig) -> Self {
        Self { store, limits }
    }

    fn normalize_input(&self, input: AssignmentInput) -> Result<AssignmentInput, AssignmentError> {
        let max = self.limits.max_field_length;
        let due = validate_due_date(&input.due_date)?;

        Ok(AssignmentInput {
            title: validate_required("Title", &input.title, max)?.to_string(),
            due_date: due.format(DATE_FORMAT).to_string(),
            class_name: validate_required("Class name", &input.class_name, max)?.to_string(),
            assignment_type: validate_required("Assignment type", &input.assignment_type, max)?
                .to_string(),
            completed: input.completed,
            priority: input.priority,
        })
    }

    fn normalize_patch(&self, patch: AssignmentPatch) -> Result<AssignmentPatch, AssignmentError> {
        let max = self.limits.max_field_length;
        let required = |field: &str, value: Option<String>| -> Result<Option<String>, AssignmentError> {
            value
                .map(|v| validate_required(field, &v, max).map(str::to_string))
                .transpose()
                .map_err(AssignmentError::from)
        };

        let due_date = patch
            .due_date
            .map(|d| {
                validate_due_date(&d).map(|date| date.format(DATE_FORMAT).to_string())
            })
            .transpose()?;

        Ok(AssignmentPatch {
            title: required("Title", patch.title)?,
            due_date,
            class_name: required("Class name", patch.class_name)?,
            assignment_type: required("Assignment type", patch.assignment_type)?,
            completed: patch.completed,
            priority: patch.priority,
        })
    }
}

impl AssignmentService for JsonAssignmentService {
    fn list(&self, username: &str) -> Vec<Assignment> {
        self.store.assignments().list_for(username)
    }

    fn add(&self, username: &str, input: AssignmentInput) -> Result<Assignment, AssignmentError> {
        let input = self.normalize_input(input)?;
        let assignment = Assignment::new(input);

        self.store
            .assignments()
            .add_assignment(username, assignment.clone())?;

        Ok(assignment)
    }

    fn edit(
        &self,
        username: &str,
        id: Uuid,
        patch: AssignmentPatch,
    ) -> Result<Assignment, AssignmentError> {
        let patch = self.normalize_patch(patch)?;
        let repo = self.store.assignments();

        let all = repo.load();
        let (key, current) = all
            .get(username)
            .and_then(|user| user.assignments.iter().find(|(_, a)| a.id == id))
            .map(|(key, a)| (key.clone(), a.clone()))
            .ok_or_else(|| AssignmentError::NotFound(id.to_string()))?;

        if patch.is_empty() {
            return Ok(current);
        }

        let mut updated = current;
        updated.apply(patch.clone());

        if !repo.update_assignment(username, &key, patch)? {
            return Err(AssignmentError::NotFound(key));
        }

        debug!("Edited assignment {} for {}", id, username);
        Ok(updated)
    }

    fn delete(&self, username: &str, id: Uuid) -> Result<bool, AssignmentError> {
        let repo = self.store.assignments();
        let all = repo.load();

        let Some(title) = all.get(username).and_then(|user| user.title_of(id)) else {
            return Ok(false);
        };

        Ok(repo.delete_assignment(username, title)?)
    }
}
