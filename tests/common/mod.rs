//! Shared fixtures for starmap integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use rusqlite::Connection;
use tempfile::TempDir;

use starmap::{AchievementPost, CompletionEvent, Lesson, Role, Snapshot, UserProfile};

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
}

pub fn user(id: &str, name: &str, role: Role) -> UserProfile {
    UserProfile {
        id: id.into(),
        name: name.to_string(),
        role,
    }
}

pub fn lesson(id: &str, title: &str, difficulty: u8) -> Lesson {
    Lesson {
        id: id.into(),
        title: title.to_string(),
        subject: "Math".to_string(),
        difficulty,
    }
}

pub fn completion(user: &str, lesson: &str, score: i64, stars: i64, day: u32) -> CompletionEvent {
    CompletionEvent {
        user_id: user.into(),
        lesson_id: lesson.into(),
        score,
        stars,
        completed_at: Some(at(day, 9)),
    }
}

pub fn post(id: &str, user: &str, achievement: &str, day: u32) -> AchievementPost {
    AchievementPost {
        id: id.into(),
        user_id: Some(user.into()),
        achievement: achievement.to_string(),
        stars: 3,
        created_at: at(day, 15),
    }
}

/// A small school: two students with progress, one without, and a teacher
pub fn school() -> Snapshot {
    Snapshot {
        users: vec![
            user("s-anika", "Anika", Role::Student),
            user("s-bilal", "Bilal", Role::Student),
            user("s-chen", "Chen", Role::Student),
            user("t-rao", "Ms. Rao", Role::Teacher),
        ],
        lessons: vec![
            lesson("l-count", "Counting to 20", 1),
            lesson("l-shapes", "Shapes Around Us", 2),
            lesson("l-add", "Adding Apples", 1),
            lesson("l-clock", "Telling Time", 3),
        ],
        progress: vec![
            completion("s-anika", "l-count", 80, 3, 1),
            completion("s-anika", "l-shapes", 100, 5, 2),
            completion("s-anika", "l-count", 95, 4, 4),
            completion("s-bilal", "l-add", 60, 2, 3),
        ],
        posts: vec![
            post("p1", "s-anika", "Finished Shapes Around Us", 2),
            post("p2", "s-bilal", "First lesson done", 3),
            post("p3", "s-anika", "Counting champion", 4),
        ],
    }
}

/// Write `snapshot` as JSON into a fresh temp dir, returning the dir and file path
pub fn write_json_snapshot(snapshot: &Snapshot) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("snapshot.json");
    let body = serde_json::to_string_pretty(snapshot).expect("Failed to serialize snapshot");
    std::fs::write(&path, body).expect("Failed to write snapshot");
    (dir, path)
}

/// Create the portal tables in a new SQLite database at `path`
pub fn create_portal_db(path: &Path) -> Connection {
    let conn = Connection::open(path).expect("Failed to open database");
    conn.execute_batch(
        "CREATE TABLE users (id TEXT PRIMARY KEY, name TEXT NOT NULL, role TEXT);
         CREATE TABLE lessons (id TEXT PRIMARY KEY, title TEXT NOT NULL, subject TEXT NOT NULL, difficulty INTEGER);
         CREATE TABLE progress (user_id TEXT, lesson_id TEXT, score INTEGER, stars INTEGER, completed_at TEXT);
         CREATE TABLE community_wall (id TEXT PRIMARY KEY, user_id TEXT, achievement TEXT NOT NULL, stars INTEGER, created_at TEXT NOT NULL);",
    )
    .expect("Failed to create tables");
    conn
}
