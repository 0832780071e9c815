//! Domain service for accounts.
//!
//! Handles sign-up, credential checks, password resets and admin removal of
//! users. Passwords are compared as plain text.

use thiserror::Error;

use crate::models::{Role, UserInfo};
use crate::validation::ValidationError;

/// Errors specific to account operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Storage(format!("{err:#}"))
    }
}

impl From<ValidationError> for AuthError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.0)
    }
}

/// Sign-up form.
#[derive(Debug, Clone, Default)]
pub struct SignUpRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
}

impl SignUpRequest {
    /// A student sign-up whose confirmation matches the password.
    pub fn student(
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let password = password.into();
        Self {
            username: username.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            confirm_password: password.clone(),
            password,
            role: Role::Student,
        }
    }
}

/// Domain service trait for accounts.
pub trait AuthService: Send + Sync {
    /// Creates the user and the mirrored settings record.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] or [`AuthError::UsernameTaken`]
    /// before anything is written.
    fn sign_up(&self, request: SignUpRequest) -> Result<UserInfo, AuthError>;

    /// Checks credentials and returns the user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown user or a
    /// wrong password.
    fn verify(&self, username: &str, password: &str) -> Result<UserInfo, AuthError>;

    fn get_user_info(&self, username: &str) -> Result<UserInfo, AuthError>;

    fn list_users(&self) -> Vec<UserInfo>;

    /// Replaces a user's password.
    fn reset_password(
        &self,
        username: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), AuthError>;

    /// Removes `username` with its settings and assignments. `actor` must be
    /// an admin other than `username`.
    fn delete_user(&self, actor: &str, username: &str) -> Result<(), AuthError>;
}
