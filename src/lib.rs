pub mod cli;
pub mod config;
pub mod constants;
pub mod db;
pub mod models;
pub mod services;
pub mod session;
pub mod validation;
pub mod views;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, SettingsCommands};
pub use config::Config;
use models::{AssignmentPatch, SettingsUpdate};

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if matches!(cli.command, Some(Commands::Init)) {
        if Config::create_default_if_missing()? {
            println!("✓ Config file created. Edit config.toml and run again.");
        } else {
            println!("config.toml already exists.");
        }
        return Ok(());
    }

    let config = Config::load()?;
    config.validate()?;

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };
    let creds = &cli.credentials;

    match command {
        Commands::Init => Ok(()),

        Commands::Signup {
            username,
            first,
            last,
            new_password,
            confirm,
            admin,
        } => cli::cmd_signup(
            &config,
            &username,
            &first,
            &last,
            &new_password,
            confirm.as_deref(),
            admin,
        ),

        Commands::Login => cli::cmd_login(&config, creds),

        Commands::Users => cli::cmd_users(&config, creds),

        Commands::DeleteUser { username } => cli::cmd_delete_user(&config, creds, &username),

        Commands::Passwd {
            new_password,
            confirm,
        } => cli::cmd_passwd(&config, creds, &new_password, &confirm),

        Commands::Add {
            title,
            due,
            class,
            kind,
            priority,
            completed,
        } => cli::cmd_add(
            &config,
            creds,
            &cli::AddArgs {
                title: &title,
                due: &due,
                class: &class,
                kind: &kind,
                priority,
                completed,
            },
        ),

        Commands::List { sort, desc } => cli::cmd_list(&config, creds, sort, desc),

        Commands::Edit {
            title,
            new_title,
            due,
            class,
            kind,
        } => {
            let patch = AssignmentPatch {
                title: new_title,
                due_date: due,
                class_name: class,
                assignment_type: kind,
                ..AssignmentPatch::default()
            };
            cli::cmd_edit(&config, creds, &title, patch)
        }

        Commands::Remove { title } => cli::cmd_remove(&config, creds, &title),

        Commands::Done { title } => cli::cmd_done(&config, creds, &title),

        Commands::Star { title } => cli::cmd_star(&config, creds, &title),

        Commands::Todo => cli::cmd_todo(&config, creds),

        Commands::Calendar { date } => cli::cmd_calendar(&config, creds, date.as_deref()),

        Commands::Progress => cli::cmd_progress(&config, creds),

        Commands::Settings { command } => match command {
            SettingsCommands::Show => cli::cmd_settings_show(&config, creds),
            SettingsCommands::Set {
                first,
                last,
                picture,
                view,
            } => {
                let update = SettingsUpdate {
                    first_name: first,
                    last_name: last,
                    profile_picture: picture,
                    default_view: view,
                };
                cli::cmd_settings_set(&config, creds, update)
            }
            SettingsCommands::Last => cli::cmd_settings_last(&config),
        },
    }
}
