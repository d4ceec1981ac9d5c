//! Read-only adapter over the portal's SQLite export
//!
//! Reads the `users`, `lessons`, `progress` and `community_wall` tables in a
//! single transaction so all four come from the same point in time.
//! Progress rows without a user or lesson are skipped; rows without a usable
//! completion time are kept undated so they still count towards stars.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{Connection, OpenFlags};
use tracing::warn;

use super::{SnapshotSource, SourceError};
use crate::domain::{AchievementPost, CompletionEvent, Lesson, Role, Snapshot, UserProfile};

pub struct SqliteSource {
    path: PathBuf,
}

impl SqliteSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(path: &std::path::Path) -> Result<Snapshot, SourceError> {
        let mut conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        let tx = conn.transaction()?;

        let snapshot = Snapshot {
            users: read_users(&tx)?,
            lessons: read_lessons(&tx)?,
            progress: read_progress(&tx)?,
            posts: read_posts(&tx)?,
        };

        tx.finish()?;
        Ok(snapshot)
    }
}

#[async_trait]
impl SnapshotSource for SqliteSource {
    fn describe(&self) -> String {
        format!("sqlite:{}", self.path.display())
    }

    async fn fetch(&self) -> Result<Snapshot, SourceError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::read(&path))
            .await
            .map_err(|e| SourceError::Worker(e.to_string()))?
    }
}

fn read_users(conn: &Connection) -> Result<Vec<UserProfile>, SourceError> {
    let mut stmt = conn.prepare("SELECT id, name, role FROM users")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, Option<String>>(2)?,
        ))
    })?;

    let mut users = Vec::new();
    for row in rows {
        let (id, name, role) = row?;
        let role = match role.as_deref().map(Role::from_str) {
            Some(Some(role)) => role,
            Some(None) => {
                warn!(user = %id, role = ?role, "unknown role, treating as student");
                Role::Student
            }
            None => Role::Student,
        };
        users.push(UserProfile {
            id: id.into(),
            name,
            role,
        });
    }
    Ok(users)
}

fn read_lessons(conn: &Connection) -> Result<Vec<Lesson>, SourceError> {
    let mut stmt = conn.prepare("SELECT id, title, subject, difficulty FROM lessons")?;
    let rows = stmt.query_map([], |r| {
        Ok(Lesson {
            id: r.get::<_, String>(0)?.into(),
            title: r.get(1)?,
            subject: r.get(2)?,
            difficulty: r.get::<_, Option<i64>>(3)?.unwrap_or(1).clamp(1, 5) as u8,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

fn read_progress(conn: &Connection) -> Result<Vec<CompletionEvent>, SourceError> {
    let mut stmt =
        conn.prepare("SELECT user_id, lesson_id, score, stars, completed_at FROM progress")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, Option<String>>(0)?,
            r.get::<_, Option<String>>(1)?,
            r.get::<_, Option<i64>>(2)?,
            r.get::<_, Option<i64>>(3)?,
            r.get::<_, Option<String>>(4)?,
        ))
    })?;

    let mut events = Vec::new();
    for row in rows {
        let (user_id, lesson_id, score, stars, completed_at) = row?;
        let (Some(user_id), Some(lesson_id)) = (user_id, lesson_id) else {
            warn!("skipping progress row without user or lesson");
            continue;
        };
        let completed_at = match completed_at.as_deref() {
            Some(raw) => {
                let parsed = parse_timestamp(raw);
                if parsed.is_none() {
                    warn!(user = %user_id, lesson = %lesson_id, raw, "unreadable completion time, keeping row undated");
                }
                parsed
            }
            None => None,
        };
        events.push(CompletionEvent {
            user_id: user_id.into(),
            lesson_id: lesson_id.into(),
            score: score.unwrap_or(0),
            stars: stars.unwrap_or(0),
            completed_at,
        });
    }
    Ok(events)
}

fn read_posts(conn: &Connection) -> Result<Vec<AchievementPost>, SourceError> {
    let mut stmt =
        conn.prepare("SELECT id, user_id, achievement, stars, created_at FROM community_wall")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, Option<String>>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, Option<i64>>(3)?,
            r.get::<_, String>(4)?,
        ))
    })?;

    let mut posts = Vec::new();
    for row in rows {
        let (id, user_id, achievement, stars, created_at) = row?;
        let Some(created_at) = parse_timestamp(&created_at) else {
            warn!(post = %id, raw = %created_at, "skipping wall post with bad timestamp");
            continue;
        };
        posts.push(AchievementPost {
            id: id.into(),
            user_id: user_id.map(Into::into),
            achievement,
            stars: stars.unwrap_or(0),
            created_at,
        });
    }
    Ok(posts)
}

/// RFC 3339, or SQLite's `YYYY-MM-DD HH:MM:SS` taken as UTC
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
