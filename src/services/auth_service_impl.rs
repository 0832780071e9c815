//! JSON-file implementation of the `AuthService` trait.

use tracing::{info, warn};

use crate::config::ValidationConfig;
use crate::db::Store;
use crate::models::{SettingsRecord, UserInfo, UserRecord};
use crate::services::auth_service::{AuthError, AuthService, SignUpRequest};
use crate::validation::{validate_password, validate_required, validate_username};

pub struct JsonAuthService {
    store: Store,
    limits: ValidationConfig,
}

impl JsonAuthService {
    #[must_use]
    pub const fn new(store: Store, limits: ValidationConfig) -> Self {
        Self { store, limits }
    }
}

impl AuthService for JsonAuthService {
    fn sign_up(&self, request: SignUpRequest) -> Result<UserInfo, AuthError> {
        let max = self.limits.max_field_length;
        let username = validate_username(&request.username, self.limits.max_username_length)?;
        let first_name = validate_required("First name", &request.first_name, max)?;
        let last_name = validate_required("Last name", &request.last_name, max)?;
        validate_password(
            &request.password,
            &request.confirm_password,
            self.limits.min_password_length,
        )?;

        let users = self.store.users();
        if users.exists(username) {
            return Err(AuthError::UsernameTaken(username.to_string()));
        }

        let record = UserRecord {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            password: request.password.clone(),
            role: request.role,
        };
        users.insert(username, record.clone())?;

        self.store
            .settings()
            .upsert(SettingsRecord::new(username, first_name, last_name))?;

        info!("Signed up {} ({})", username, record.role);
        Ok(UserInfo::from_record(username, &record))
    }

    fn verify(&self, username: &str, password: &str) -> Result<UserInfo, AuthError> {
        let username = username.trim();
        let Some(record) = self.store.users().get(username) else {
            warn!("Login attempt for unknown user {}", username);
            return Err(AuthError::InvalidCredentials);
        };

        if !record.password_matches(password) {
            warn!("Wrong password for {}", username);
            return Err(AuthError::InvalidCredentials);
        }

        Ok(UserInfo::from_record(username, &record))
    }

    fn get_user_info(&self, username: &str) -> Result<UserInfo, AuthError> {
        let record = self
            .store
            .users()
            .get(username)
            .ok_or_else(|| AuthError::UserNotFound(username.to_string()))?;

        Ok(UserInfo::from_record(username, &record))
    }

    fn list_users(&self) -> Vec<UserInfo> {
        self.store
            .users()
            .load()
            .iter()
            .map(|(username, record)| UserInfo::from_record(username, record))
            .collect()
    }

    fn reset_password(
        &self,
        username: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), AuthError> {
        validate_password(
            new_password,
            confirm_password,
            self.limits.min_password_length,
        )?;

        if !self.store.users().update_password(username, new_password)? {
            return Err(AuthError::UserNotFound(username.to_string()));
        }

        info!("Password reset for {}", username);
        Ok(())
    }

    fn delete_user(&self, actor: &str, username: &str) -> Result<(), AuthError> {
        let users = self.store.users();

        let actor_info = self.get_user_info(actor)?;
        if !actor_info.is_admin() {
            return Err(AuthError::Unauthorized(
                "Only admins can delete users".to_string(),
            ));
        }
        if actor == username {
            return Err(AuthError::Unauthorized(
                "Admins cannot delete their own account".to_string(),
            ));
        }

        if !users.remove(username)? {
            return Err(AuthError::UserNotFound(username.to_string()));
        }
        self.store.settings().remove(username)?;
        self.store.assignments().remove_user(username)?;

        info!("{} deleted user {}", actor, username);
        Ok(())
    }
}
