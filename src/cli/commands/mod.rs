mod account;
mod add;
mod calendar;
mod edit;
mod list;
mod mark;
mod progress;
mod remove;
mod settings;
mod todo;

pub use account::{cmd_delete_user, cmd_login, cmd_passwd, cmd_signup, cmd_users};
pub use add::{AddArgs, cmd_add};
pub use calendar::cmd_calendar;
pub use edit::cmd_edit;
pub use list::cmd_list;
pub use mark::{cmd_done, cmd_star};
pub use progress::cmd_progress;
pub use remove::cmd_remove;
pub use settings::{cmd_settings_last, cmd_settings_set, cmd_settings_show};
pub use todo::cmd_todo;

use uuid::Uuid;

use super::Credentials;
use crate::config::Config;
use crate::models::Assignment;
use crate::session::Session;

/// Opens a session and signs in with the given credentials.
fn signed_in(config: &Config, credentials: &Credentials) -> anyhow::Result<Session> {
    let (Some(user), Some(password)) = (&credentials.user, &credentials.password) else {
        anyhow::bail!("This command needs --user and --password");
    };

    let mut session = Session::from_config(config)?;
    session.login(user, password)?;
    Ok(session)
}

fn id_for_title(session: &Session, title: &str) -> anyhow::Result<Uuid> {
    session
        .find_by_title(title)
        .map(|a| a.id)
        .ok_or_else(|| anyhow::anyhow!("No assignment titled '{title}'. Use 'tracker list' to see titles."))
}

fn print_rows(rows: &[&Assignment]) {
    println!(
        "{:<2} {:<28} {:<12} {:<16} {:<12} {}",
        "", "Title", "Due", "Class", "Type", "Done"
    );
    println!("{:-<80}", "");

    for a in rows {
        let star = if a.priority { "★" } else { " " };
        let done = if a.completed { "Yes" } else { "No" };
        println!(
            "{:<2} {:<28} {:<12} {:<16} {:<12} {}",
            star, a.title, a.due_date, a.class_name, a.assignment_type, done
        );
    }
}
