use chrono::Local;

use super::{print_rows, signed_in};
use crate::cli::Credentials;
use crate::config::Config;
use crate::views;

pub fn cmd_todo(config: &Config, credentials: &Credentials) -> anyhow::Result<()> {
    let session = signed_in(config, credentials)?;

    let open: Vec<_> = session
        .todo()
        .into_iter()
        .filter(|a| !a.completed)
        .collect();

    if open.is_empty() {
        println!("Nothing left to do. 🎉");
        return Ok(());
    }

    println!("To-Do ({} open)", open.len());
    print_rows(&open);

    let late = views::overdue(session.assignments(), Local::now().date_naive());
    if !late.is_empty() {
        println!();
        println!("Overdue:");
        for a in late {
            println!("  ! {} (due {})", a.title, a.due_date);
        }
    }
    Ok(())
}
