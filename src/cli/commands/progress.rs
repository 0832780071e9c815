use super::signed_in;
use crate::cli::Credentials;
use crate::config::Config;

const BAR_WIDTH: usize = 40;

pub fn cmd_progress(config: &Config, credentials: &Credentials) -> anyhow::Result<()> {
    let session = signed_in(config, credentials)?;
    let summary = session.progress();

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = (((summary.percentage / 100.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);

    println!(
        "[{}{}] {:.1}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        summary.percentage
    );
    println!(
        "{} of {} completed, {} remaining",
        summary.completed, summary.total, summary.remaining
    );
    Ok(())
}
