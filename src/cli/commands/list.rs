//! List assignments command handler

use super::{print_rows, signed_in};
use crate::cli::Credentials;
use crate::config::Config;
use crate::views::{self, SortKey};

pub fn cmd_list(
    config: &Config,
    credentials: &Credentials,
    sort: SortKey,
    descending: bool,
) -> anyhow::Result<()> {
    let session = signed_in(config, credentials)?;

    if session.assignments().is_empty() {
        println!("No assignments yet.");
        println!();
        println!("Add one with: tracker add \"Problem Set 1\" 2025-05-10 Physics Homework");
        return Ok(());
    }

    let rows = views::sort_table(session.assignments(), sort, descending);
    println!(
        "Assignments ({} total, sorted by {}{})",
        rows.len(),
        sort,
        if descending { ", descending" } else { "" }
    );
    print_rows(&rows);

    println!();
    println!("Legend: ★ Priority");
    Ok(())
}
