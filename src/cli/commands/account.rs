//! Account command handlers

use super::{print_rows, signed_in};
use crate::cli::Credentials;
use crate::config::Config;
use crate::models::{DefaultView, Role};
use crate::services::SignUpRequest;
use crate::session::Session;
use crate::views;

pub fn cmd_signup(
    config: &Config,
    username: &str,
    first: &str,
    last: &str,
    password: &str,
    confirm: Option<&str>,
    admin: bool,
) -> anyhow::Result<()> {
    let session = Session::from_config(config)?;

    let request = SignUpRequest {
        username: username.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        password: password.to_string(),
        confirm_password: confirm.unwrap_or(password).to_string(),
        role: if admin { Role::Admin } else { Role::Student },
    };

    let user = session.sign_up(request)?;
    println!("✓ Created {} account '{}'", user.role, user.username);
    println!();
    println!("Sign in with: tracker login -u {} -p <password>", user.username);
    Ok(())
}

pub fn cmd_login(config: &Config, credentials: &Credentials) -> anyhow::Result<()> {
    let session = signed_in(config, credentials)?;
    let Some(user) = session.current_user() else {
        anyhow::bail!("Login did not complete");
    };

    println!("Welcome, {}!", user.display_name());
    println!();

    match session.landing_view() {
        DefaultView::Home => {
            let summary = session.progress();
            println!(
                "You have {} assignments, {} still to do.",
                summary.total, summary.remaining
            );
        }
        DefaultView::Table => {
            let rows: Vec<_> = session.assignments().iter().collect();
            print_rows(&rows);
        }
        DefaultView::Calendar => {
            for (day, items) in views::calendar(session.assignments()) {
                println!("{day}");
                for a in items {
                    println!("  • {} ({})", a.title, a.class_name);
                }
            }
        }
        DefaultView::Todo => print_rows(&session.todo()),
        DefaultView::Progress => {
            println!("Progress: {:.1}% complete", session.completion_percentage());
        }
    }

    Ok(())
}

pub fn cmd_users(config: &Config, credentials: &Credentials) -> anyhow::Result<()> {
    let session = signed_in(config, credentials)?;
    if session.role() != Some(Role::Admin) {
        anyhow::bail!("Only admins can list users");
    }

    let users = session.services().auth.list_users();
    println!("Users ({} total)", users.len());
    println!("{:-<50}", "");
    for user in users {
        println!("{:<20} {:<8} {}", user.username, user.role, user.display_name());
    }
    Ok(())
}

pub fn cmd_delete_user(
    config: &Config,
    credentials: &Credentials,
    username: &str,
) -> anyhow::Result<()> {
    let session = signed_in(config, credentials)?;

    println!("Delete '{username}' and all of their assignments?");
    println!("Enter 'y' to confirm, anything else to cancel:");

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    if input.trim().eq_ignore_ascii_case("y") {
        session.delete_user(username)?;
        println!("✓ Deleted: {username}");
    } else {
        println!("Cancelled.");
    }
    Ok(())
}

pub fn cmd_passwd(
    config: &Config,
    credentials: &Credentials,
    new_password: &str,
    confirm: &str,
) -> anyhow::Result<()> {
    let session = signed_in(config, credentials)?;
    session.change_password(new_password, confirm)?;
    println!("✓ Password changed");
    Ok(())
}
