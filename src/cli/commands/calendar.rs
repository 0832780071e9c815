//! Calendar command handler

use super::signed_in;
use crate::cli::Credentials;
use crate::config::Config;
use crate::validation::validate_due_date;
use crate::views;

pub fn cmd_calendar(
    config: &Config,
    credentials: &Credentials,
    date: Option<&str>,
) -> anyhow::Result<()> {
    let session = signed_in(config, credentials)?;

    if let Some(date) = date {
        let day = validate_due_date(date)?;
        let items = views::due_on(session.assignments(), day);
        if items.is_empty() {
            println!("Nothing due on {day}.");
        }
        for a in items {
            let done = if a.completed { "✓" } else { "•" };
            println!("{done} {} ({}, {})", a.title, a.class_name, a.assignment_type);
        }
        return Ok(());
    }

    let days = views::calendar(session.assignments());
    if days.is_empty() {
        println!("No dated assignments.");
        return Ok(());
    }

    for (day, items) in days {
        println!("{}", day.format("%a %Y-%m-%d"));
        for a in items {
            let done = if a.completed { "✓" } else { "•" };
            println!("  {done} {} ({})", a.title, a.class_name);
        }
    }

    let undated = session
        .assignments()
        .iter()
        .filter(|a| a.due().is_none())
        .count();
    if undated > 0 {
        println!();
        println!("({undated} assignments have no valid due date and are not shown)");
    }
    Ok(())
}
