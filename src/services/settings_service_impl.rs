//! JSON-file implementation of the `SettingsService` trait.

use tracing::{debug, info};

use crate::config::ValidationConfig;
use crate::db::Store;
use crate::models::{DefaultView, SettingsRecord, SettingsUpdate};
use crate::services::settings_service::{SettingsError, SettingsService};
use crate::validation::validate_required;

pub struct JsonSettingsService {
    store: Store,
    limits: ValidationConfig,
}

impl JsonSettingsService {
    #[must_use]
    pub const fn new(store: Store, limits: ValidationConfig) -> Self {
        Self { store, limits }
    }

    fn check(&self, update: &mut SettingsUpdate) -> Result<(), SettingsError> {
        let max = self.limits.max_field_length;

        if let Some(first_name) = update.first_name.as_mut() {
            *first_name = validate_required("First name", first_name, max)?.to_string();
        }
        if let Some(last_name) = update.last_name.as_mut() {
            *last_name = validate_required("Last name", last_name, max)?.to_string();
        }
        if let Some(picture) = update.profile_picture.as_mut() {
            *picture = picture.trim().to_string();
        }

        Ok(())
    }
}

impl SettingsService for JsonSettingsService {
    fn get(&self, username: &str) -> Result<SettingsRecord, SettingsError> {
        self.store
            .settings()
            .get(username)
            .ok_or_else(|| SettingsError::NotFound(username.to_string()))
    }

    fn update(
        &self,
        username: &str,
        mut update: SettingsUpdate,
    ) -> Result<SettingsRecord, SettingsError> {
        self.check(&mut update)?;

        let repo = self.store.settings();
        let mut record = match repo.get(username) {
            Some(record) => record,
            None => {
                // Users created before settings existed still get a record.
                let user = self
                    .store
                    .users()
                    .get(username)
                    .ok_or_else(|| SettingsError::NotFound(username.to_string()))?;
                debug!("Creating missing settings record for {}", username);
                SettingsRecord::new(username, &user.first_name, &user.last_name)
            }
        };

        record.username = username.to_string();
        record.apply(update);

        repo.upsert(record.clone())?;
        repo.save_snapshot(&record)?;

        info!(
            "Settings saved for {} (default view: {})",
            username, record.default_view
        );
        Ok(record)
    }

    fn landing_view(&self, username: &str) -> DefaultView {
        self.store
            .settings()
            .get(username)
            .map(|s| s.default_view)
            .unwrap_or_default()
    }

    fn last_saved(&self) -> Option<SettingsRecord> {
        self.store.settings().load_snapshot()
    }
}
