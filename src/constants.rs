pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub mod files {

    pub const USERS: &str = "users.json";

    pub const USERS_SETTINGS: &str = "users_settings.json";

    pub const LOCAL_SETTINGS: &str = "user_settings.json";

    pub const ASSIGNMENTS: &str = "assignments.json";
}

pub mod limits {

    pub const MAX_FIELD_LEN: usize = 200;

    pub const MAX_USERNAME_LEN: usize = 50;
}
