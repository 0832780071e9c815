pub mod assignment;
pub mod settings;
pub mod user;

pub use assignment::AssignmentRepository;
pub use settings::SettingsRepository;
pub use user::UserRepository;
