use super::{id_for_title, signed_in};
use crate::cli::Credentials;
use crate::config::Config;

pub fn cmd_remove(config: &Config, credentials: &Credentials, title: &str) -> anyhow::Result<()> {
    let mut session = signed_in(config, credentials)?;
    let id = id_for_title(&session, title)?;

    if session.delete_assignment(id)? {
        println!("✓ Removed: {title}");
    } else {
        println!("'{title}' was already removed.");
    }
    Ok(())
}
