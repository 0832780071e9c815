pub mod assignment;
pub mod settings;
pub mod user;

pub use assignment::{Assignment, AssignmentInput, AssignmentMap, AssignmentPatch, UserAssignments};
pub use settings::{DefaultView, SettingsMap, SettingsRecord, SettingsUpdate};
pub use user::{Role, UserInfo, UserMap, UserRecord};
