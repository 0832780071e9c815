//! Settings command handlers

use super::signed_in;
use crate::cli::Credentials;
use crate::config::Config;
use crate::models::{SettingsRecord, SettingsUpdate};
use crate::session::Session;

fn print_settings(settings: &SettingsRecord) {
    println!("User:            {}", settings.username);
    println!("Name:            {} {}", settings.first_name, settings.last_name);
    println!(
        "Profile picture: {}",
        if settings.profile_picture.is_empty() {
            "(none)"
        } else {
            settings.profile_picture.as_str()
        }
    );
    println!("Default view:    {}", settings.default_view);
}

pub fn cmd_settings_show(config: &Config, credentials: &Credentials) -> anyhow::Result<()> {
    let session = signed_in(config, credentials)?;
    print_settings(&session.settings()?);
    Ok(())
}

pub fn cmd_settings_set(
    config: &Config,
    credentials: &Credentials,
    update: SettingsUpdate,
) -> anyhow::Result<()> {
    if update.is_empty() {
        println!("Nothing to change.");
        println!("Pass at least one of --first, --last, --picture, --view");
        return Ok(());
    }

    let session = signed_in(config, credentials)?;
    let saved = session.update_settings(update)?;
    println!("✓ Settings saved");
    print_settings(&saved);
    Ok(())
}

pub fn cmd_settings_last(config: &Config) -> anyhow::Result<()> {
    let session = Session::from_config(config)?;
    match session.services().settings.last_saved() {
        Some(settings) => print_settings(&settings),
        None => println!("No settings have been saved on this machine yet."),
    }
    Ok(())
}
