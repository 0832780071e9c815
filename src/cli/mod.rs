//! CLI module - Command-line interface for the assignment tracker
//!
//! Each invocation opens a session from `--user/--password`, performs one
//! action and prints the result.

mod commands;

use clap::{Args, Parser, Subcommand};

use crate::views::SortKey;

/// Assignment Tracker - keep track of homework, essays and exams
#[derive(Parser)]
#[command(name = "tracker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub credentials: Credentials,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct Credentials {
    /// Username to sign in as
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Password for --user
    #[arg(short, long, global = true)]
    pub password: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create default config file
    Init,

    /// Create a new account
    Signup {
        username: String,
        #[arg(long)]
        first: String,
        #[arg(long)]
        last: String,
        /// Password for the new account
        #[arg(long = "new-password")]
        new_password: String,
        /// Repeat the password (defaults to --new-password)
        #[arg(long)]
        confirm: Option<String>,
        /// Create an admin account
        #[arg(long)]
        admin: bool,
    },

    /// Sign in and show the default view
    Login,

    /// List all accounts (admins only)
    Users,

    /// Delete an account with its settings and assignments (admins only)
    DeleteUser { username: String },

    /// Change the signed-in user's password
    Passwd {
        #[arg(long = "new-password")]
        new_password: String,
        #[arg(long)]
        confirm: String,
    },

    /// Add an assignment
    #[command(alias = "a")]
    Add {
        title: String,
        /// Due date as YYYY-MM-DD
        due: String,
        class: String,
        #[arg(value_name = "TYPE")]
        kind: String,
        #[arg(long)]
        priority: bool,
        #[arg(long)]
        completed: bool,
    },

    /// Show the assignment table
    #[command(alias = "ls", alias = "l", alias = "table")]
    List {
        /// Column to sort by: title, due, class, type, completed
        #[arg(long, default_value = "due")]
        sort: SortKey,
        #[arg(long)]
        desc: bool,
    },

    /// Edit an assignment, looked up by title
    Edit {
        title: String,
        #[arg(long = "title")]
        new_title: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        class: Option<String>,
        #[arg(long = "type")]
        kind: Option<String>,
    },

    /// Delete an assignment, looked up by title
    #[command(alias = "rm", alias = "r")]
    Remove { title: String },

    /// Toggle an assignment's completed flag
    Done { title: String },

    /// Toggle an assignment's priority flag
    Star { title: String },

    /// Show the to-do list (priority first)
    Todo,

    /// Show assignments grouped by due date
    #[command(alias = "cal")]
    Calendar {
        /// Only show this day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Show completion progress
    Progress,

    /// Show or change settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show the signed-in user's settings
    Show,
    /// Change settings
    Set {
        #[arg(long)]
        first: Option<String>,
        #[arg(long)]
        last: Option<String>,
        /// Path to a profile picture; pass "" to clear
        #[arg(long)]
        picture: Option<String>,
        /// Home, Table, Calendar, Todo or Progress
        #[arg(long)]
        view: Option<crate::models::DefaultView>,
    },
    /// Show the last settings saved on this machine
    Last,
}

pub use commands::*;
