use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Whole contents of `users_settings.json`, keyed by username.
pub type SettingsMap = BTreeMap<String, SettingsRecord>;

/// The page a user lands on right after login.
///
/// Deserialization never fails: anything unrecognized (or `null`) falls back
/// to [`DefaultView::Home`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>")]
pub enum DefaultView {
    #[default]
    Home,
    Table,
    Calendar,
    Todo,
    Progress,
}

impl DefaultView {
    pub const ALL: [Self; 5] = [
        Self::Home,
        Self::Table,
        Self::Calendar,
        Self::Todo,
        Self::Progress,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Table => "Table",
            Self::Calendar => "Calendar",
            Self::Todo => "Todo",
            Self::Progress => "Progress",
        }
    }
}

impl fmt::Display for DefaultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DefaultView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(Self::Home),
            "table" => Ok(Self::Table),
            "calendar" => Ok(Self::Calendar),
            "todo" | "to-do" | "to do" => Ok(Self::Todo),
            "progress" => Ok(Self::Progress),
            _ => Err(format!(
                "{s:?} is not a valid view (expected one of Home, Table, Calendar, Todo, Progress)"
            )),
        }
    }
}

impl From<Option<String>> for DefaultView {
    fn from(value: Option<String>) -> Self {
        value.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsRecord {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Path to the profile picture, empty when none was chosen.
    pub profile_picture: String,
    pub default_view: DefaultView,
}

impl SettingsRecord {
    #[must_use]
    pub fn new(username: &str, first_name: &str, last_name: &str) -> Self {
        Self {
            username: username.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            profile_picture: String::new(),
            default_view: DefaultView::Home,
        }
    }

    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(picture) = update.profile_picture {
            self.profile_picture = picture;
        }
        if let Some(view) = update.default_view {
            self.default_view = view;
        }
    }
}

/// Fields submitted by the settings form. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_picture: Option<String>,
    pub default_view: Option<DefaultView>,
}

impl SettingsUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.profile_picture.is_none()
            && self.default_view.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_view_falls_back_to_home() {
        let record: SettingsRecord =
            serde_json::from_str(r#"{"username":"a","default_view":"Dashboard"}"#).unwrap();
        assert_eq!(record.default_view, DefaultView::Home);

        let record: SettingsRecord =
            serde_json::from_str(r#"{"username":"a","default_view":null}"#).unwrap();
        assert_eq!(record.default_view, DefaultView::Home);

        let record: SettingsRecord = serde_json::from_str(r#"{"username":"a"}"#).unwrap();
        assert_eq!(record.default_view, DefaultView::Home);
    }

    #[test]
    fn test_todo_label_is_accepted() {
        let record: SettingsRecord =
            serde_json::from_str(r#"{"default_view":"To-Do"}"#).unwrap();
        assert_eq!(record.default_view, DefaultView::Todo);
        assert_eq!("calendar".parse::<DefaultView>().unwrap(), DefaultView::Calendar);
    }

    #[test]
    fn test_view_serializes_as_label() {
        let json = serde_json::to_string(&DefaultView::Progress).unwrap();
        assert_eq!(json, "\"Progress\"");

        for view in DefaultView::ALL {
            let json = serde_json::to_string(&view).unwrap();
            assert_eq!(json, format!("\"{}\"", view.as_str()));
            assert_eq!(view.as_str().parse::<DefaultView>().unwrap(), view);
        }
    }

    #[test]
    fn test_apply_only_touches_given_fields() {
        let mut record = SettingsRecord::new("alice", "Alice", "Smith");
        record.apply(SettingsUpdate {
            default_view: Some(DefaultView::Table),
            ..Default::default()
        });
        assert_eq!(record.first_name, "Alice");
        assert_eq!(record.default_view, DefaultView::Table);
        assert!(SettingsUpdate::default().is_empty());
    }
}
