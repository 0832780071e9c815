use chrono::{NaiveDate, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::constants::DATE_FORMAT;

/// Whole contents of `assignments.json`, keyed by username.
pub type AssignmentMap = BTreeMap<String, UserAssignments>;

/// One user's entry in `assignments.json`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserAssignments {
    /// Keyed by title, in the order the records were added.
    pub assignments: IndexMap<String, Assignment>,
}

impl UserAssignments {
    /// Records in insertion order, which is the key order of the file.
    #[must_use]
    pub fn ordered(&self) -> Vec<Assignment> {
        self.assignments.values().cloned().collect()
    }

    /// Fills in what older files leave out: a missing title becomes the map
    /// key and a missing id is derived from `username` and the key, so it is
    /// the same on every load until the record is next written.
    pub fn backfill(&mut self, username: &str) {
        for (key, assignment) in &mut self.assignments {
            if assignment.title.is_empty() {
                assignment.title.clone_from(key);
            }
            if assignment.id.is_nil() {
                let name = format!("{username}/{key}");
                assignment.id = Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes());
            }
        }
    }

    #[must_use]
    pub fn title_of(&self, id: Uuid) -> Option<&str> {
        self.assignments
            .iter()
            .find(|(_, a)| a.id == id)
            .map(|(title, _)| title.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Stable identity; edits never change it. Nil for records written
    /// before ids existed, until the repository backfills one.
    #[serde(default)]
    pub id: Uuid,

    #[serde(default)]
    pub title: String,

    /// Expected as `YYYY-MM-DD`; older files may hold anything.
    #[serde(default)]
    pub due_date: String,

    #[serde(default)]
    pub class_name: String,

    #[serde(default)]
    pub assignment_type: String,

    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub priority: bool,

    #[serde(default)]
    pub created_at: String,
}

impl Assignment {
    #[must_use]
    pub fn new(input: AssignmentInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            due_date: input.due_date,
            class_name: input.class_name,
            assignment_type: input.assignment_type,
            completed: input.completed,
            priority: input.priority,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }

    /// Parsed due date, `None` when the stored string is not a valid date.
    #[must_use]
    pub fn due(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.due_date.trim(), DATE_FORMAT).ok()
    }

    pub fn apply(&mut self, patch: AssignmentPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(class_name) = patch.class_name {
            self.class_name = class_name;
        }
        if let Some(kind) = patch.assignment_type {
            self.assignment_type = kind;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
    }
}

/// Fields of the add-assignment form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentInput {
    pub title: String,
    pub due_date: String,
    pub class_name: String,
    pub assignment_type: String,
    pub completed: bool,
    pub priority: bool,
}

impl AssignmentInput {
    pub fn new(
        title: impl Into<String>,
        due_date: impl Into<String>,
        class_name: impl Into<String>,
        assignment_type: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            due_date: due_date.into(),
            class_name: class_name.into(),
            assignment_type: assignment_type.into(),
            completed: false,
            priority: false,
        }
    }
}

/// Partial update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentPatch {
    pub title: Option<String>,
    pub due_date: Option<String>,
    pub class_name: Option<String>,
    pub assignment_type: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<bool>,
}

impl AssignmentPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.due_date.is_none()
            && self.class_name.is_none()
            && self.assignment_type.is_none()
            && self.completed.is_none()
            && self.priority.is_none()
    }

    #[must_use]
    pub fn completed(value: bool) -> Self {
        Self {
            completed: Some(value),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn priority(value: bool) -> Self {
        Self {
            priority: Some(value),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_record_gets_defaults() {
        let json = r#"{"title":"HW1","due_date":"2025-05-10","class_name":"Physics","assignment_type":"Homework"}"#;
        let a: Assignment = serde_json::from_str(json).unwrap();
        assert!(!a.completed);
        assert!(!a.priority);
        assert!(a.created_at.is_empty());
        assert!(a.id.is_nil());
    }

    #[test]
    fn test_due_parses_only_valid_dates() {
        let mut a = Assignment::new(AssignmentInput::new("HW1", "2025-05-10", "Physics", "Homework"));
        assert_eq!(a.due(), NaiveDate::from_ymd_opt(2025, 5, 10));

        a.due_date = "13/45/2025".to_string();
        assert_eq!(a.due(), None);
    }

    #[test]
    fn test_apply_keeps_id() {
        let mut a = Assignment::new(AssignmentInput::new("HW1", "2025-05-10", "Physics", "Homework"));
        let id = a.id;
        a.apply(AssignmentPatch {
            title: Some("HW1 (revised)".to_string()),
            completed: Some(true),
            ..Default::default()
        });
        assert_eq!(a.id, id);
        assert_eq!(a.title, "HW1 (revised)");
        assert!(a.completed);
        assert_eq!(a.class_name, "Physics");
    }

    #[test]
    fn test_ordered_follows_file_order() {
        let json = r#"{"assignments":{
            "Zeta":{"title":"Zeta","due_date":"2025-05-10"},
            "Alpha":{"title":"Alpha","due_date":"2025-05-11"},
            "Mid":{"title":"Mid","due_date":"2025-05-12"}
        }}"#;
        let user: UserAssignments = serde_json::from_str(json).unwrap();
        let titles: Vec<String> = user.ordered().into_iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["Zeta", "Alpha", "Mid"]);

        let written = serde_json::to_string(&user).unwrap();
        assert!(written.find("Zeta").unwrap() < written.find("Alpha").unwrap());
    }

    #[test]
    fn test_backfill_is_deterministic() {
        let json = r#"{"assignments":{"HW1":{"due_date":"2025-05-10"},"Lab":{"title":"Lab 2"}}}"#;
        let mut first: UserAssignments = serde_json::from_str(json).unwrap();
        let mut second = first.clone();
        first.backfill("alice");
        second.backfill("alice");

        assert_eq!(first, second);
        assert_eq!(first.assignments["HW1"].title, "HW1");
        assert_eq!(first.assignments["Lab"].title, "Lab 2");
        assert!(!first.assignments["HW1"].id.is_nil());
        assert_ne!(first.assignments["HW1"].id, first.assignments["Lab"].id);
        assert_eq!(first.title_of(first.assignments["Lab"].id), Some("Lab"));

        let mut other = serde_json::from_str::<UserAssignments>(json).unwrap();
        other.backfill("bob");
        assert_ne!(other.assignments["HW1"].id, first.assignments["HW1"].id);
    }
}
