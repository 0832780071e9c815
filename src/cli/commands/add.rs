//! Add assignment command handler

use super::signed_in;
use crate::cli::Credentials;
use crate::config::Config;
use crate::models::AssignmentInput;

pub struct AddArgs<'a> {
    pub title: &'a str,
    pub due: &'a str,
    pub class: &'a str,
    pub kind: &'a str,
    pub priority: bool,
    pub completed: bool,
}

pub fn cmd_add(config: &Config, credentials: &Credentials, args: &AddArgs<'_>) -> anyhow::Result<()> {
    let mut session = signed_in(config, credentials)?;

    if session.find_by_title(args.title.trim()).is_some() {
        println!("Note: replacing the existing assignment titled '{}'", args.title.trim());
    }

    let mut input = AssignmentInput::new(args.title, args.due, args.class, args.kind);
    input.priority = args.priority;
    input.completed = args.completed;

    let added = session.add_assignment(input)?;
    println!(
        "✓ Added '{}' ({}, {}) due {}",
        added.title, added.class_name, added.assignment_type, added.due_date
    );
    println!(
        "  {} assignments, {:.1}% complete",
        session.assignments().len(),
        session.completion_percentage()
    );
    Ok(())
}
