pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, SignUpRequest};
pub use auth_service_impl::JsonAuthService;

pub mod settings_service;
pub mod settings_service_impl;
pub use settings_service::{SettingsError, SettingsService};
pub use settings_service_impl::JsonSettingsService;

pub mod assignment_service;
pub mod assignment_service_impl;
pub use assignment_service::{AssignmentError, AssignmentService};
pub use assignment_service_impl::JsonAssignmentService;
