//! Edit assignment command handler

use super::{id_for_title, signed_in};
use crate::cli::Credentials;
use crate::config::Config;
use crate::models::AssignmentPatch;

pub fn cmd_edit(
    config: &Config,
    credentials: &Credentials,
    title: &str,
    patch: AssignmentPatch,
) -> anyhow::Result<()> {
    if patch.is_empty() {
        println!("Nothing to change.");
        println!("Pass at least one of --title, --due, --class, --type");
        return Ok(());
    }

    let mut session = signed_in(config, credentials)?;
    let id = id_for_title(&session, title)?;

    let updated = session.edit_assignment(id, patch)?;
    println!("✓ Updated '{}'", updated.title);
    println!(
        "  Due: {} | Class: {} | Type: {}",
        updated.due_date, updated.class_name, updated.assignment_type
    );
    Ok(())
}
