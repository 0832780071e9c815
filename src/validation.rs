//! Input checks run before anything is written to a store.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

use crate::constants::DATE_FORMAT;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Trimmed, non-empty and at most `max_len` characters.
pub fn validate_required<'a>(
    field: &str,
    value: &'a str,
    max_len: usize,
) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(format!("{field} cannot be empty")));
    }
    if trimmed.chars().count() > max_len {
        return Err(ValidationError::new(format!(
            "{field} must be {max_len} characters or less"
        )));
    }
    Ok(trimmed)
}

pub fn validate_username(username: &str, max_len: usize) -> Result<&str, ValidationError> {
    let username = validate_required("Username", username, max_len)?;

    if username.chars().any(char::is_whitespace) {
        return Err(ValidationError::new("Username cannot contain spaces"));
    }

    Ok(username)
}

/// Password and its confirmation must match; plain text, no strength rules
/// beyond `min_len`.
pub fn validate_password(
    password: &str,
    confirm: &str,
    min_len: usize,
) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::new("Password cannot be empty"));
    }
    if password.chars().count() < min_len {
        return Err(ValidationError::new(format!(
            "Password must be at least {min_len} characters"
        )));
    }
    if password != confirm {
        return Err(ValidationError::new("Passwords do not match"));
    }
    Ok(())
}

/// Accepts exactly `YYYY-MM-DD` naming a real calendar day.
pub fn validate_due_date(due_date: &str) -> Result<NaiveDate, ValidationError> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid regex"));

    let trimmed = due_date.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("Due date cannot be empty"));
    }

    if !re.is_match(trimmed) {
        return Err(ValidationError::new(format!(
            "Invalid due date: {trimmed:?}. Use YYYY-MM-DD"
        )));
    }

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| {
        ValidationError::new(format!("Invalid due date: {trimmed:?} is not a calendar date"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert_eq!(validate_required("Title", "  HW1 ", 10).unwrap(), "HW1");
        assert!(validate_required("Title", "", 10).is_err());
        assert!(validate_required("Title", "   ", 10).is_err());
        assert!(validate_required("Title", "a".repeat(11).as_str(), 10).is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice", 50).is_ok());
        assert!(validate_username("alice smith", 50).is_err());
        assert!(validate_username("", 50).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("pw1", "pw1", 1).is_ok());
        assert!(validate_password("pw1", "pw2", 1).is_err());
        assert!(validate_password("", "", 1).is_err());
        assert!(validate_password("abc", "abc", 8).is_err());
    }

    #[test]
    fn test_validate_due_date() {
        assert_eq!(
            validate_due_date("2025-05-10").unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 10).unwrap()
        );
        assert!(validate_due_date(" 2024-02-29 ").is_ok());
        assert!(validate_due_date("13/45/2025").is_err());
        assert!(validate_due_date("2025-5-10").is_err());
        assert!(validate_due_date("2025-02-30").is_err());
        assert!(validate_due_date("2023-02-29").is_err());
        assert!(validate_due_date("").is_err());
    }
}
