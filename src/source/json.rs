//! JSON snapshot files
//!
//! The document mirrors the store's tables:
//! `{"users": [...], "lessons": [...], "progress": [...], "community_wall": [...]}`.
//! A missing table is a parse error, not an empty table.

use std::path::PathBuf;

use async_trait::async_trait;

use super::{SnapshotSource, SourceError};
use crate::domain::Snapshot;

pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SnapshotSource for JsonFileSource {
    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }

    async fn fetch(&self) -> Result<Snapshot, SourceError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.display().to_string(),
                source,
            })?;

        let snapshot: Snapshot = serde_json::from_str(&content)?;
        Ok(snapshot)
    }
}
