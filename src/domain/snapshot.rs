//! A complete, consistent set of rows handed to the engine by a fetch layer

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::{AchievementPost, CompletionEvent, Lesson, UserId, UserProfile};

/// Every row a view needs, fetched in one go
///
/// The serialized field names follow the store's table names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub users: Vec<UserProfile>,
    pub lessons: Vec<Lesson>,
    pub progress: Vec<CompletionEvent>,
    #[serde(rename = "community_wall")]
    pub posts: Vec<AchievementPost>,
}

impl Snapshot {
    pub fn user(&self, id: &UserId) -> Option<&UserProfile> {
        self.users.iter().find(|u| &u.id == id)
    }

    /// Users with the student role, in snapshot order
    pub fn students(&self) -> impl Iterator<Item = &UserProfile> {
        self.users.iter().filter(|u| u.is_student())
    }

    pub fn posts_for<'a>(&'a self, id: &'a UserId) -> impl Iterator<Item = &'a AchievementPost> {
        self.posts.iter().filter(move |p| p.is_by(id))
    }

    /// Hash of the row contents, independent of row order within each table
    ///
    /// Any added, removed or changed row produces a different value.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        unordered_hash(&self.users).hash(&mut hasher);
        unordered_hash(&self.lessons).hash(&mut hasher);
        unordered_hash(&self.progress).hash(&mut hasher);
        unordered_hash(&self.posts).hash(&mut hasher);
        hasher.finish()
    }
}

fn unordered_hash<T: Hash>(rows: &[T]) -> u64 {
    let mut row_hashes: Vec<u64> = rows
        .iter()
        .map(|row| {
            let mut h = DefaultHasher::new();
            row.hash(&mut h);
            h.finish()
        })
        .collect();
    row_hashes.sort_unstable();

    let mut hasher = DefaultHasher::new();
    row_hashes.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn event(user: &str, lesson: &str, stars: i64) -> CompletionEvent {
        CompletionEvent {
            user_id: user.into(),
            lesson_id: lesson.into(),
            score: 90,
            stars,
            completed_at: Some(Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_fingerprint_ignores_row_order() {
        let a = Snapshot {
            progress: vec![event("u1", "l1", 3), event("u1", "l2", 4)],
            ..Default::default()
        };
        let b = Snapshot {
            progress: vec![event("u1", "l2", 4), event("u1", "l1", 3)],
            ..Default::default()
        };
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_fingerprint_changes_with_new_event() {
        let mut snap = Snapshot {
            progress: vec![event("u1", "l1", 3)],
            ..Default::default()
        };
        let before = snap.fingerprint();
        snap.progress.push(event("u1", "l1", 3));
        assert_ne!(before, snap.fingerprint());
    }

    #[test]
    fn test_deserializes_store_table_names() {
        let json = r#"{
            "users": [{"id": "u1", "name": "Ravi", "role": "student"}],
            "lessons": [],
            "progress": [],
            "community_wall": [{
                "id": "p1", "user_id": "u1", "achievement": "First lesson",
                "stars": 2, "created_at": "2025-03-01T10:00:00Z"
            }]
        }"#;
        let snap: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.posts.len(), 1);
        assert_eq!(snap.students().count(), 1);
        assert_eq!(snap.posts_for(&UserId::new("u1")).count(), 1);
    }

    #[test]
    fn test_deserializes_rows_with_null_columns() {
        let json = r#"{
            "users": [],
            "lessons": [],
            "progress": [{"user_id": "u1", "lesson_id": "l1", "stars": 3, "completed_at": null}],
            "community_wall": [{
                "id": "p1", "user_id": null, "achievement": "Class trip",
                "created_at": "2025-03-01T10:00:00Z"
            }]
        }"#;
        let snap: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.progress[0].completed_at, None);
        assert_eq!(snap.posts[0].user_id, None);
        assert_eq!(snap.posts_for(&UserId::new("u1")).count(), 0);
    }
}
