//! Read-only projections over a user's assignment list: table sorting,
//! calendar grouping, to-do ordering and progress.

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::models::Assignment;

/// Percentage of completed assignments, `0.0` for an empty list.
#[must_use]
pub fn completion_percentage(assignments: &[Assignment]) -> f64 {
    if assignments.is_empty() {
        return 0.0;
    }
    let done = assignments.iter().filter(|a| a.completed).count();

    #[allow(clippy::cast_precision_loss)]
    let pct = 100.0 * done as f64 / assignments.len() as f64;
    pct
}

/// Priority items first, then the rest; input order is kept within each group.
#[must_use]
pub fn todo_ordering(assignments: &[Assignment]) -> Vec<&Assignment> {
    let (mut flagged, rest): (Vec<&Assignment>, Vec<&Assignment>) =
        assignments.iter().partition(|a| a.priority);
    flagged.extend(rest);
    flagged
}

/// Incomplete assignments due strictly before `today`. Unparseable dates are
/// never overdue.
#[must_use]
pub fn overdue(assignments: &[Assignment], today: NaiveDate) -> Vec<&Assignment> {
    assignments
        .iter()
        .filter(|a| !a.completed && a.due().is_some_and(|d| d < today))
        .collect()
}

/// Assignments grouped by due date. Entries whose date does not parse are
/// left out.
#[must_use]
pub fn calendar(assignments: &[Assignment]) -> BTreeMap<NaiveDate, Vec<&Assignment>> {
    let mut days: BTreeMap<NaiveDate, Vec<&Assignment>> = BTreeMap::new();
    for assignment in assignments {
        if let Some(date) = assignment.due() {
            days.entry(date).or_default().push(assignment);
        }
    }
    days
}

#[must_use]
pub fn due_on(assignments: &[Assignment], date: NaiveDate) -> Vec<&Assignment> {
    assignments
        .iter()
        .filter(|a| a.due() == Some(date))
        .collect()
}

/// Sortable columns of the assignment table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Title,
    #[default]
    DueDate,
    Class,
    Type,
    Completed,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Self::Title => "title",
            Self::DueDate => "due",
            Self::Class => "class",
            Self::Type => "type",
            Self::Completed => "completed",
        };
        f.write_str(token)
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "due" | "due_date" | "due-date" | "date" => Ok(Self::DueDate),
            "class" | "class_name" => Ok(Self::Class),
            "type" | "assignment_type" => Ok(Self::Type),
            "completed" | "done" | "status" => Ok(Self::Completed),
            _ => Err(format!(
                "{s:?} is not a sortable column (title, due, class, type, completed)"
            )),
        }
    }
}

fn compare(a: &Assignment, b: &Assignment, key: SortKey) -> Ordering {
    match key {
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        // Unparseable dates sort after every real date.
        SortKey::DueDate => match (a.due(), b.due()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.due_date.cmp(&b.due_date),
        },
        SortKey::Class => a.class_name.to_lowercase().cmp(&b.class_name.to_lowercase()),
        SortKey::Type => a
            .assignment_type
            .to_lowercase()
            .cmp(&b.assignment_type.to_lowercase()),
        SortKey::Completed => a.completed.cmp(&b.completed),
    }
}

/// Stable sort by one column; ties keep their input order in both directions.
#[must_use]
pub fn sort_table(assignments: &[Assignment], key: SortKey, descending: bool) -> Vec<&Assignment> {
    let mut rows: Vec<&Assignment> = assignments.iter().collect();
    rows.sort_by(|a, b| {
        let ord = compare(a, b, key);
        if descending { ord.reverse() } else { ord }
    });
    rows
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSummary {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
    pub percentage: f64,
}

#[must_use]
pub fn progress_summary(assignments: &[Assignment]) -> ProgressSummary {
    let completed = assignments.iter().filter(|a| a.completed).count();
    ProgressSummary {
        total: assignments.len(),
        completed,
        remaining: assignments.len() - completed,
        percentage: completion_percentage(assignments),
    }
}
