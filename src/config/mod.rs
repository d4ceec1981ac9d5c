//! Configuration loading and management

mod io;

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Feed lengths for the dashboards
    #[serde(default)]
    pub feed: FeedSettings,

    /// View cache settings
    #[serde(default)]
    pub cache: CacheSettings,

    /// Where snapshots are fetched from
    #[serde(default)]
    pub source: SourceSettings,
}

/// How many rows each feed shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedSettings {
    /// Achievements on the student dashboard
    #[serde(default = "default_student_recent")]
    pub student_recent: i64,

    /// Achievements on the teacher dashboard (whole school)
    #[serde(default = "default_teacher_recent")]
    pub teacher_recent: i64,

    /// Rows in the teacher's recent progress tab
    #[serde(default = "default_recent_completions")]
    pub recent_completions: i64,
}

fn default_student_recent() -> i64 {
    5
}

fn default_teacher_recent() -> i64 {
    10
}

fn default_recent_completions() -> i64 {
    10
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            student_recent: default_student_recent(),
            teacher_recent: default_teacher_recent(),
            recent_completions: default_recent_completions(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Assembled views older than this are recomputed even if the snapshot
    /// fingerprint still matches. 0 disables caching.
    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: u64,
}

fn default_max_age_secs() -> u64 {
    30
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_age_secs: default_max_age_secs(),
        }
    }
}

impl CacheSettings {
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_secs)
    }
}

/// Snapshot backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Json,
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(default)]
    pub kind: SourceKind,

    /// Snapshot file, relative paths resolve against the working directory
    #[serde(default = "default_source_path")]
    pub path: PathBuf,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_source_path() -> PathBuf {
    PathBuf::from("snapshot.json")
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            path: default_source_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SourceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.feed.student_recent, 5);
        assert_eq!(config.feed.teacher_recent, 10);
        assert_eq!(config.cache.max_age(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_sections() {
        let config: Config = toml::from_str(
            r#"
            [feed]
            teacher_recent = 3

            [source]
            kind = "sqlite"
            path = "portal.db"
            "#,
        )
        .unwrap();
        assert_eq!(config.feed.student_recent, 5);
        assert_eq!(config.feed.teacher_recent, 3);
        assert_eq!(config.source.kind, SourceKind::Sqlite);
        assert_eq!(config.source.path, PathBuf::from("portal.db"));
        assert_eq!(config.source.timeout_secs, 10);
    }
}
