//! Leaderboard command

use anyhow::Result;
use std::path::Path;

use starmap::config::Config;
use starmap::progress::top;
use starmap::view;

use super::{fetch_snapshot, print_json};

pub async fn leaderboard_command(
    work_dir: &Path,
    config: &Config,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let fetched = fetch_snapshot(work_dir, config).await;
    let board = view::leaderboard(fetched)?;
    let shown = match limit {
        Some(n) => top(&board, n),
        None => &board[..],
    };

    if json {
        return print_json(&shown);
    }

    if shown.is_empty() {
        println!("No students found.");
        return Ok(());
    }

    for entry in shown {
        println!("  #{:<3} {:<24} {:>4} ★", entry.rank, entry.display_name, entry.total_stars);
    }

    Ok(())
}
