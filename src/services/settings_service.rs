//! Domain service for display preferences.

use thiserror::Error;

use crate::models::{DefaultView, SettingsRecord, SettingsUpdate};
use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("No settings for user: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<anyhow::Error> for SettingsError {
    fn from(err: anyhow::Error) -> Self {
        Self::Storage(format!("{err:#}"))
    }
}

impl From<ValidationError> for SettingsError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.0)
    }
}

pub trait SettingsService: Send + Sync {
    fn get(&self, username: &str) -> Result<SettingsRecord, SettingsError>;

    /// Applies the settings form and saves it to the per-user map and the
    /// local snapshot.
    fn update(&self, username: &str, update: SettingsUpdate)
    -> Result<SettingsRecord, SettingsError>;

    /// Page to show after login. Missing settings mean [`DefaultView::Home`].
    fn landing_view(&self, username: &str) -> DefaultView;

    /// The last settings form saved on this machine.
    fn last_saved(&self) -> Option<SettingsRecord>;
}
