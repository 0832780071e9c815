//! End-to-end flows through `Session` with JSON files on disk.

use assignment_tracker::config::{Config, StorageConfig};
use assignment_tracker::models::{
    AssignmentInput, AssignmentPatch, DefaultView, Role, SettingsUpdate,
};
use assignment_tracker::services::{AssignmentError, AuthError, SignUpRequest};
use assignment_tracker::session::{Session, SessionError};
use std::path::{Path, PathBuf};

fn test_config() -> (Config, PathBuf) {
    let dir = std::env::temp_dir().join(format!("tracker-session-test-{}", uuid::Uuid::new_v4()));
    let config = Config {
        storage: StorageConfig::with_data_dir(dir.display().to_string()),
        ..Config::default()
    };
    (config, dir)
}

fn open(config: &Config) -> Session {
    Session::from_config(config).expect("failed to open session")
}

fn read_json(path: &Path) -> serde_json::Value {
    let raw = std::fs::read_to_string(path).expect("failed to read file");
    serde_json::from_str(&raw).expect("file is not JSON")
}

fn signed_in_alice(config: &Config) -> Session {
    let mut session = open(config);
    session
        .sign_up(SignUpRequest::student("alice", "Alice", "Liddell", "pw1"))
        .expect("sign up failed");
    session.login("alice", "pw1").expect("login failed");
    session
}

#[test]
fn test_sign_up_and_login() {
    let (config, dir) = test_config();
    let mut session = open(&config);

    let user = session
        .sign_up(SignUpRequest::student("alice", "Alice", "Liddell", "pw1"))
        .unwrap();
    assert_eq!(user.role, Role::Student);

    let users = read_json(&dir.join("users.json"));
    assert_eq!(users["alice"]["role"], "student");
    assert_eq!(users["alice"]["first_name"], "Alice");

    let err = session.login("alice", "wrong").unwrap_err();
    assert!(matches!(
        err,
        SessionError::Auth(AuthError::InvalidCredentials)
    ));
    assert!(session.current_user().is_none());

    let view = session.login("alice", "pw1").unwrap();
    assert_eq!(view, DefaultView::Home);
    assert_eq!(session.current_user().unwrap().username, "alice");

    session.logout();
    assert!(!session.is_signed_in());
    assert!(session.assignments().is_empty());

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn test_duplicate_username_rejected() {
    let (config, dir) = test_config();
    let session = signed_in_alice(&config);

    let err = session
        .sign_up(SignUpRequest::student("alice", "Other", "Person", "pw2"))
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::Auth(AuthError::UsernameTaken(_))
    ));

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn test_mismatched_confirmation_rejected() {
    let (config, dir) = test_config();
    let session = open(&config);

    let mut request = SignUpRequest::student("bob", "Bob", "Builder", "pw1");
    request.confirm_password = "pw2".to_string();
    assert!(session.sign_up(request).is_err());
    assert!(!dir.join("users.json").exists());

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn test_assignment_lifecycle() {
    let (config, dir) = test_config();
    let mut session = signed_in_alice(&config);
    let path = dir.join("assignments.json");

    let hw1 = session
        .add_assignment(AssignmentInput::new("HW1", "2025-05-10", "Physics", "Homework"))
        .unwrap();

    let json = read_json(&path);
    assert_eq!(json["alice"]["assignments"]["HW1"]["completed"], false);
    assert_eq!(session.assignments().len(), 1);

    assert!(session.delete_assignment(hw1.id).unwrap());
    assert!(read_json(&path)["alice"]["assignments"].get("HW1").is_none());
    assert!(session.assignments().is_empty());

    assert!(!session.delete_assignment(hw1.id).unwrap());

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn test_invalid_date_changes_nothing() {
    let (config, dir) = test_config();
    let mut session = signed_in_alice(&config);

    session
        .add_assignment(AssignmentInput::new("HW1", "2025-05-10", "Physics", "Homework"))
        .unwrap();
    let before = std::fs::read_to_string(dir.join("assignments.json")).unwrap();

    let err = session
        .add_assignment(AssignmentInput::new("HW2", "13/45/2025", "Physics", "Homework"))
        .unwrap_err();
    assert!(err.to_string().contains("YYYY-MM-DD"));

    assert!(
        session
            .add_assignment(AssignmentInput::new("HW3", "2025-02-30", "Physics", "Homework"))
            .is_err()
    );
    assert!(
        session
            .add_assignment(AssignmentInput::new("   ", "2025-05-10", "Physics", "Homework"))
            .is_err()
    );

    let after = std::fs::read_to_string(dir.join("assignments.json")).unwrap();
    assert_eq!(before, after);
    assert_eq!(session.assignments().len(), 1);

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn test_edit_rename_keeps_identity() {
    let (config, dir) = test_config();
    let mut session = signed_in_alice(&config);

    let hw1 = session
        .add_assignment(AssignmentInput::new("HW1", "2025-05-10", "Physics", "Homework"))
        .unwrap();

    let patch = AssignmentPatch {
        title: Some("Problem Set 1".to_string()),
        due_date: Some("2025-05-12".to_string()),
        ..AssignmentPatch::default()
    };
    let updated = session.edit_assignment(hw1.id, patch).unwrap();
    assert_eq!(updated.id, hw1.id);
    assert_eq!(updated.title, "Problem Set 1");
    assert_eq!(updated.class_name, "Physics");

    let json = read_json(&dir.join("assignments.json"));
    assert!(json["alice"]["assignments"].get("HW1").is_none());
    assert_eq!(
        json["alice"]["assignments"]["Problem Set 1"]["due_date"],
        "2025-05-12"
    );

    session.refresh().unwrap();
    assert_eq!(session.assignments().len(), 1);
    assert_eq!(session.assignments()[0].id, hw1.id);

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn test_toggles_and_views() {
    let (config, dir) = test_config();
    let mut session = signed_in_alice(&config);

    let a = session
        .add_assignment(AssignmentInput::new("A", "2025-05-10", "Physics", "Homework"))
        .unwrap();
    let b = session
        .add_assignment(AssignmentInput::new("B", "2025-05-11", "Math", "Quiz"))
        .unwrap();
    session
        .add_assignment(AssignmentInput::new("C", "2025-05-12", "Art", "Project"))
        .unwrap();

    assert!(session.completion_percentage().abs() < f64::EPSILON);

    assert_eq!(session.find_displayed("B", "2025-05-11").unwrap().id, b.id);
    assert!(session.find_displayed("B", "2025-05-10").is_none());

    assert!(session.toggle_completed(a.id).unwrap().completed);
    assert!((session.completion_percentage() - 100.0 / 3.0).abs() < 1e-9);

    assert!(session.toggle_priority(b.id).unwrap().priority);
    let order: Vec<_> = session.todo().iter().map(|x| x.title.clone()).collect();
    assert_eq!(order, vec!["B", "A", "C"]);

    assert!(!session.toggle_completed(a.id).unwrap().completed);
    assert_eq!(session.progress().completed, 0);

    // Fresh login sees the same order and flags.
    let mut again = open(&config);
    again.login("alice", "pw1").unwrap();
    let titles: Vec<_> = again.assignments().iter().map(|x| x.title.clone()).collect();
    assert_eq!(titles, vec!["A", "B", "C"]);
    assert!(again.find(b.id).unwrap().priority);

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn test_settings_default_view() {
    let (config, dir) = test_config();
    let session = signed_in_alice(&config);

    assert_eq!(session.settings().unwrap().default_view, DefaultView::Home);

    let saved = session
        .update_settings(SettingsUpdate {
            default_view: Some(DefaultView::Calendar),
            profile_picture: Some("me.png".to_string()),
            ..SettingsUpdate::default()
        })
        .unwrap();
    assert_eq!(saved.default_view, DefaultView::Calendar);
    assert_eq!(saved.first_name, "Alice");

    let snapshot = read_json(&dir.join("user_settings.json"));
    assert_eq!(snapshot["username"], "alice");
    assert_eq!(snapshot["default_view"], "Calendar");

    let mut again = open(&config);
    assert_eq!(again.login("alice", "pw1").unwrap(), DefaultView::Calendar);
    assert_eq!(
        again.services().settings.last_saved().unwrap().profile_picture,
        "me.png"
    );

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn test_unknown_default_view_lands_home() {
    let (config, dir) = test_config();
    let _ = signed_in_alice(&config);

    std::fs::write(
        dir.join("users_settings.json"),
        r#"{"alice":{"username":"alice","first_name":"Alice","last_name":"Liddell","profile_picture":"","default_view":"Dashboard"}}"#,
    )
    .unwrap();

    let mut session = open(&config);
    assert_eq!(session.login("alice", "pw1").unwrap(), DefaultView::Home);

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn test_change_password() {
    let (config, dir) = test_config();
    let session = signed_in_alice(&config);

    assert!(session.change_password("new", "other").is_err());
    session.change_password("pw2", "pw2").unwrap();

    let mut again = open(&config);
    assert!(again.login("alice", "pw1").is_err());
    assert!(again.login("alice", "pw2").is_ok());

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn test_only_admins_delete_users() {
    let (config, dir) = test_config();
    let mut alice = signed_in_alice(&config);
    alice
        .add_assignment(AssignmentInput::new("HW1", "2025-05-10", "Physics", "Homework"))
        .unwrap();

    let mut admin_request = SignUpRequest::student("root", "Ada", "Admin", "secret");
    admin_request.role = Role::Admin;
    alice.sign_up(admin_request).unwrap();

    let err = alice.delete_user("root").unwrap_err();
    assert!(matches!(err, SessionError::Auth(AuthError::Unauthorized(_))));

    let mut admin = open(&config);
    admin.login("root", "secret").unwrap();
    assert!(admin.delete_user("root").is_err());

    admin.delete_user("alice").unwrap();
    assert!(read_json(&dir.join("users.json")).get("alice").is_none());
    assert!(read_json(&dir.join("assignments.json")).get("alice").is_none());
    assert!(read_json(&dir.join("users_settings.json")).get("alice").is_none());

    let mut gone = open(&config);
    assert!(gone.login("alice", "pw1").is_err());

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn test_actions_require_login() {
    let (config, dir) = test_config();
    let mut session = open(&config);

    let err = session
        .add_assignment(AssignmentInput::new("HW1", "2025-05-10", "Physics", "Homework"))
        .unwrap_err();
    assert!(matches!(err, SessionError::NotSignedIn));
    assert!(session.settings().is_err());

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn test_corrupt_settings_file_lands_home() {
    let (config, dir) = test_config();
    let session = signed_in_alice(&config);
    session
        .update_settings(SettingsUpdate {
            default_view: Some(DefaultView::Progress),
            ..SettingsUpdate::default()
        })
        .unwrap();

    std::fs::write(dir.join("users_settings.json"), "{\"alice\": [").unwrap();

    let mut again = open(&config);
    assert_eq!(again.login("alice", "pw1").unwrap(), DefaultView::Home);

    let _ = std::fs::remove_dir_all(dir);
}

fn is_storage_error(err: &SessionError) -> bool {
    matches!(err, SessionError::Assignment(AssignmentError::Storage(_)))
}

#[test]
fn test_write_failure_leaves_memory_unchanged() {
    let (config, dir) = test_config();
    let mut session = signed_in_alice(&config);

    let hw1 = session
        .add_assignment(AssignmentInput::new("HW1", "2025-05-10", "Physics", "Homework"))
        .unwrap();
    let before = session.assignments().to_vec();

    // A directory where the temp file goes makes every save fail.
    std::fs::create_dir(dir.join("assignments.json.tmp")).unwrap();

    let err = session
        .add_assignment(AssignmentInput::new("HW2", "2025-05-11", "Physics", "Homework"))
        .unwrap_err();
    assert!(is_storage_error(&err));
    assert_eq!(session.assignments(), before.as_slice());

    let patch = AssignmentPatch {
        title: Some("Renamed".to_string()),
        ..AssignmentPatch::default()
    };
    let err = session.edit_assignment(hw1.id, patch).unwrap_err();
    assert!(is_storage_error(&err));
    assert_eq!(session.assignments(), before.as_slice());

    let err = session.toggle_completed(hw1.id).unwrap_err();
    assert!(is_storage_error(&err));
    assert_eq!(session.assignments(), before.as_slice());

    let err = session.delete_assignment(hw1.id).unwrap_err();
    assert!(is_storage_error(&err));
    assert_eq!(session.assignments(), before.as_slice());

    let json = read_json(&dir.join("assignments.json"));
    assert_eq!(json["alice"]["assignments"]["HW1"]["title"], "HW1");
    assert!(json["alice"]["assignments"].get("HW2").is_none());

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn test_edit_record_whose_key_differs_from_title() {
    let (config, dir) = test_config();
    let _ = signed_in_alice(&config);

    std::fs::write(
        dir.join("assignments.json"),
        r#"{"alice":{"assignments":{"HW1":{"title":"Homework 1","due_date":"2025-05-10","class_name":"Physics","assignment_type":"Homework","completed":false,"priority":false}}}}"#,
    )
    .unwrap();

    let mut session = open(&config);
    session.login("alice", "pw1").unwrap();
    let id = session.find_by_title("Homework 1").unwrap().id;

    assert!(session.toggle_completed(id).unwrap().completed);
    assert!(session.toggle_priority(id).unwrap().priority);

    let json = read_json(&dir.join("assignments.json"));
    let stored = &json["alice"]["assignments"]["HW1"];
    assert_eq!(stored["completed"], true);
    assert_eq!(stored["priority"], true);
    assert_eq!(stored["id"], id.to_string());

    assert!(session.delete_assignment(id).unwrap());
    assert!(session.assignments().is_empty());

    let _ = std::fs::remove_dir_all(dir);
}
