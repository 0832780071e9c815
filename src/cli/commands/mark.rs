//! Completed / priority toggles

use super::{id_for_title, signed_in};
use crate::cli::Credentials;
use crate::config::Config;

pub fn cmd_done(config: &Config, credentials: &Credentials, title: &str) -> anyhow::Result<()> {
    let mut session = signed_in(config, credentials)?;
    let id = id_for_title(&session, title)?;

    let updated = session.toggle_completed(id)?;
    if updated.completed {
        println!("✓ Marked '{}' as completed", updated.title);
    } else {
        println!("Marked '{}' as not completed", updated.title);
    }
    println!("Progress: {:.1}% complete", session.completion_percentage());
    Ok(())
}

pub fn cmd_star(config: &Config, credentials: &Credentials, title: &str) -> anyhow::Result<()> {
    let mut session = signed_in(config, credentials)?;
    let id = id_for_title(&session, title)?;

    let updated = session.toggle_priority(id)?;
    if updated.priority {
        println!("★ '{}' is now a priority", updated.title);
    } else {
        println!("'{}' is no longer a priority", updated.title);
    }
    Ok(())
}
