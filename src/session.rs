//! The signed-in user's session.
//!
//! [`Session`] keeps the current user and an in-memory copy of their
//! assignments. Every mutation is written through the services first; the
//! in-memory list only changes once the write has succeeded, so a failed
//! action leaves what the views show untouched.

use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::db::Store;
use crate::models::{
    Assignment, AssignmentInput, AssignmentPatch, DefaultView, Role, SettingsRecord,
    SettingsUpdate, UserInfo,
};
use crate::services::{
    AssignmentError, AssignmentService, AuthError, AuthService, JsonAssignmentService,
    JsonAuthService, JsonSettingsService, SettingsError, SettingsService, SignUpRequest,
};
use crate::views::{self, ProgressSummary};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No user is signed in")]
    NotSignedIn,

    #[error("Assignment not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Assignment(#[from] AssignmentError),
}

#[derive(Clone)]
pub struct Services {
    pub auth: Arc<dyn AuthService>,

    pub settings: Arc<dyn SettingsService>,

    pub assignments: Arc<dyn AssignmentService>,
}

impl Services {
    /// JSON-file backed services sharing one store.
    #[must_use]
    pub fn json(store: &Store, config: &Config) -> Self {
        let limits = config.validation.clone();
        Self {
            auth: Arc::new(JsonAuthService::new(store.clone(), limits.clone())),
            settings: Arc::new(JsonSettingsService::new(store.clone(), limits.clone())),
            assignments: Arc::new(JsonAssignmentService::new(store.clone(), limits)),
        }
    }
}

pub struct Session {
    services: Services,
    current_user: Option<UserInfo>,
    assignments: Vec<Assignment>,
    landing_view: DefaultView,
}

impl Session {
    #[must_use]
    pub const fn new(services: Services) -> Self {
        Self {
            services,
            current_user: None,
            assignments: Vec::new(),
            landing_view: DefaultView::Home,
        }
    }

    /// Opens the configured data directory and builds a signed-out session.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let store = Store::open(&config.storage)?;
        Ok(Self::new(Services::json(&store, config)))
    }

    #[must_use]
    pub const fn services(&self) -> &Services {
        &self.services
    }

    #[must_use]
    pub const fn current_user(&self) -> Option<&UserInfo> {
        self.current_user.as_ref()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.current_user.as_ref().map(|u| u.role)
    }

    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.current_user.is_some()
    }

    /// The signed-in user's assignments, in insertion order.
    #[must_use]
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    #[must_use]
    pub const fn landing_view(&self) -> DefaultView {
        self.landing_view
    }

    fn username(&self) -> Result<String, SessionError> {
        self.current_user
            .as_ref()
            .map(|u| u.username.clone())
            .ok_or(SessionError::NotSignedIn)
    }

    /// Creates an account. Does not sign it in.
    pub fn sign_up(&self, request: SignUpRequest) -> Result<UserInfo, SessionError> {
        Ok(self.services.auth.sign_up(request)?)
    }

    /// Checks credentials, loads the user's assignments and resolves the
    /// landing view. On failure the session is left as it was.
    pub fn login(&mut self, username: &str, password: &str) -> Result<DefaultView, SessionError> {
        let user = self.services.auth.verify(username, password)?;

        self.assignments = self.services.assignments.list(&user.username);
        self.landing_view = self.services.settings.landing_view(&user.username);

        info!(
            "{} signed in with {} assignments, landing on {}",
            user.username,
            self.assignments.len(),
            self.landing_view
        );
        self.current_user = Some(user);
        Ok(self.landing_view)
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.current_user.take() {
            info!("{} signed out", user.username);
        }
        self.assignments.clear();
        self.landing_view = DefaultView::Home;
    }

    /// Replace the in-memory list with what is on disk.
    pub fn refresh(&mut self) -> Result<(), SessionError> {
        let username = self.username()?;
        self.assignments = self.services.assignments.list(&username);
        Ok(())
    }

    #[must_use]
    pub fn find(&self, id: Uuid) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.id == id)
    }

    #[must_use]
    pub fn find_by_title(&self, title: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.title == title)
    }

    /// Looks a row up by what the table displays: title and due date.
    #[must_use]
    pub fn find_displayed(&self, title: &str, due_date: &str) -> Option<&Assignment> {
        self.assignments
            .iter()
            .find(|a| a.title == title && a.due_date == due_date)
    }

    pub fn add_assignment(&mut self, input: AssignmentInput) -> Result<Assignment, SessionError> {
        let username = self.username()?;
        let added = self.services.assignments.add(&username, input)?;

        // Same title on disk was overwritten; mirror that.
        self.assignments.retain(|a| a.title != added.title);
        self.assignments.push(added.clone());
        Ok(added)
    }

    pub fn edit_assignment(
        &mut self,
        id: Uuid,
        patch: AssignmentPatch,
    ) -> Result<Assignment, SessionError> {
        let username = self.username()?;
        if self.find(id).is_none() {
            return Err(SessionError::NotFound(id.to_string()));
        }

        let updated = self.services.assignments.edit(&username, id, patch)?;
        self.replace_in_memory(&updated);
        Ok(updated)
    }

    /// A rename may have overwritten another record with the same title.
    fn replace_in_memory(&mut self, updated: &Assignment) {
        self.assignments
            .retain(|a| a.id == updated.id || a.title != updated.title);
        if let Some(slot) = self.assignments.iter_mut().find(|a| a.id == updated.id) {
            *slot = updated.clone();
        }
    }

    /// Returns whether the assignment was still on disk. It is dropped from
    /// memory either way.
    pub fn delete_assignment(&mut self, id: Uuid) -> Result<bool, SessionError> {
        let username = self.username()?;
        let existed = self.services.assignments.delete(&username, id)?;

        if !existed {
            warn!("Assignment {} was already gone from disk", id);
        }
        self.assignments.retain(|a| a.id != id);
        Ok(existed)
    }

    pub fn toggle_completed(&mut self, id: Uuid) -> Result<Assignment, SessionError> {
        let username = self.username()?;
        let completed = self
            .find(id)
            .map(|a| a.completed)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        let updated = self
            .services
            .assignments
            .set_completed(&username, id, !completed)?;
        self.replace_in_memory(&updated);
        Ok(updated)
    }

    pub fn toggle_priority(&mut self, id: Uuid) -> Result<Assignment, SessionError> {
        let username = self.username()?;
        let priority = self
            .find(id)
            .map(|a| a.priority)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        let updated = self
            .services
            .assignments
            .set_priority(&username, id, !priority)?;
        self.replace_in_memory(&updated);
        Ok(updated)
    }

    pub fn settings(&self) -> Result<SettingsRecord, SessionError> {
        let username = self.username()?;
        Ok(self.services.settings.get(&username)?)
    }

    /// Saves the settings form. The new default view applies from the next
    /// login.
    pub fn update_settings(&self, update: SettingsUpdate) -> Result<SettingsRecord, SessionError> {
        let username = self.username()?;
        Ok(self.services.settings.update(&username, update)?)
    }

    pub fn change_password(&self, new_password: &str, confirm: &str) -> Result<(), SessionError> {
        let username = self.username()?;
        Ok(self
            .services
            .auth
            .reset_password(&username, new_password, confirm)?)
    }

    /// Admin action; the signed-in user must be an admin.
    pub fn delete_user(&self, username: &str) -> Result<(), SessionError> {
        let actor = self.username()?;
        Ok(self.services.auth.delete_user(&actor, username)?)
    }

    #[must_use]
    pub fn completion_percentage(&self) -> f64 {
        views::completion_percentage(&self.assignments)
    }

    #[must_use]
    pub fn todo(&self) -> Vec<&Assignment> {
        views::todo_ordering(&self.assignments)
    }

    #[must_use]
    pub fn progress(&self) -> ProgressSummary {
        views::progress_summary(&self.assignments)
    }
}
