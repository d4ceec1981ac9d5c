//! CLI command implementations

pub mod init;
pub mod leaderboard;
pub mod student;
pub mod teacher;

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use starmap::config::Config;
use starmap::domain::Snapshot;
use starmap::source::{self, SourceError};

/// Load the explicit config file, or discover one for `work_dir`
pub fn load_config(work_dir: &Path, explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => Config::from_file(path),
        None => Config::from_dir(work_dir),
    }
}

/// Fetch one snapshot from the configured source
///
/// The error is handed on untouched so the view layer can report it as
/// unavailable data.
pub async fn fetch_snapshot(work_dir: &Path, config: &Config) -> Result<Snapshot, SourceError> {
    let source = source::from_settings(&config.source, work_dir);
    info!(source = %source.describe(), "Fetching snapshot");
    source::fetch_with_timeout(source.as_ref(), config.source.timeout()).await
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Calendar day of a timestamp, or a dash when the store has none
pub fn format_day(at: Option<DateTime<Utc>>) -> String {
    at.map_or_else(|| "----------".to_string(), |at| at.format("%Y-%m-%d").to_string())
}

/// `★★★☆☆` style rating for terminal output
pub fn star_bar(stars: u32, max: u32) -> String {
    let filled = stars.min(max) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(max as usize - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_bar() {
        assert_eq!(star_bar(3, 5), "★★★☆☆");
        assert_eq!(star_bar(9, 5), "★★★★★");
        assert_eq!(star_bar(0, 5), "☆☆☆☆☆");
    }

    #[test]
    fn test_format_day() {
        use chrono::TimeZone;
        let at = Utc.with_ymd_and_hms(2025, 3, 9, 17, 45, 0).unwrap();
        assert_eq!(format_day(Some(at)), "2025-03-09");
        assert_eq!(format_day(None), "----------");
    }
}
