//! Snapshot sources
//!
//! A source performs all I/O for one view: it either returns a complete
//! [`Snapshot`] or fails as a whole. The engine never sees partial data.
//!
//! # Usage
//!
//! ```ignore
//! let source = source::from_settings(&config.source, &work_dir);
//! let snapshot = source::fetch_with_timeout(source.as_ref(), config.source.timeout()).await;
//! let view = view::student_view(&ctx, snapshot, &config.feed)?;
//! ```

mod json;
mod sqlite;

pub use json::JsonFileSource;
pub use sqlite::SqliteSource;

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{SourceKind, SourceSettings};
use crate::domain::Snapshot;

/// Why a snapshot could not be fetched
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("fetch timed out after {0:?}")]
    Timeout(Duration),

    #[error("fetch worker failed: {0}")]
    Worker(String),
}

/// Anything that can hand the engine a consistent snapshot
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Short label for logs
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<Snapshot, SourceError>;
}

/// Fetch with an upper bound on wall time
pub async fn fetch_with_timeout(
    source: &dyn SnapshotSource,
    limit: Duration,
) -> Result<Snapshot, SourceError> {
    match tokio::time::timeout(limit, source.fetch()).await {
        Ok(result) => {
            if let Ok(snapshot) = &result {
                tracing::debug!(
                    source = %source.describe(),
                    users = snapshot.users.len(),
                    lessons = snapshot.lessons.len(),
                    progress = snapshot.progress.len(),
                    posts = snapshot.posts.len(),
                    "fetched snapshot"
                );
            }
            result
        }
        Err(_) => {
            tracing::warn!(source = %source.describe(), ?limit, "snapshot fetch timed out");
            Err(SourceError::Timeout(limit))
        }
    }
}

/// Build the configured source; relative paths resolve against `work_dir`
pub fn from_settings(settings: &SourceSettings, work_dir: &Path) -> Box<dyn SnapshotSource> {
    let path = if settings.path.is_absolute() {
        settings.path.clone()
    } else {
        work_dir.join(&settings.path)
    };

    match settings.kind {
        SourceKind::Json => Box::new(JsonFileSource::new(path)),
        SourceKind::Sqlite => Box::new(SqliteSource::new(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stalled;

    #[async_trait]
    impl SnapshotSource for Stalled {
        fn describe(&self) -> String {
            "stalled".to_string()
        }

        async fn fetch(&self) -> Result<Snapshot, SourceError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Snapshot::default())
        }
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let result = fetch_with_timeout(&Stalled, Duration::from_millis(20)).await;
        assert!(matches!(result, Err(SourceError::Timeout(_))));
    }

    #[test]
    fn test_from_settings_resolves_relative_paths() {
        let settings = SourceSettings::default();
        let source = from_settings(&settings, Path::new("/srv/portal"));
        assert_eq!(source.describe(), "json:/srv/portal/snapshot.json");
    }
}
