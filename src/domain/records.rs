use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LessonId, PostId, Role, UserId};

/// Highest star rating a single lesson attempt can earn
pub const MAX_LESSON_STARS: u32 = 5;

/// Highest quiz score (percent)
pub const MAX_SCORE: u32 = 100;

/// One row of the `progress` table: a user finishing a lesson
///
/// `score` and `stars` are kept signed so malformed upstream rows survive
/// deserialization; use the `clamped_*` accessors for arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompletionEvent {
    pub user_id: UserId,
    pub lesson_id: LessonId,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub stars: i64,
    /// Missing in some store rows; such a completion still counts but sorts
    /// after every dated one
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl CompletionEvent {
    /// Stars normalized into `0..=5`
    pub fn clamped_stars(&self) -> u32 {
        self.stars.clamp(0, MAX_LESSON_STARS as i64) as u32
    }

    /// Score normalized into `0..=100`
    pub fn clamped_score(&self) -> u32 {
        self.score.clamp(0, MAX_SCORE as i64) as u32
    }
}

/// One row of the `community_wall` table
///
/// A free-text celebration; it need not correspond to a real completion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AchievementPost {
    pub id: PostId,
    /// None when the author row is gone
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub achievement: String,
    #[serde(default)]
    pub stars: i64,
    pub created_at: DateTime<Utc>,
}

impl AchievementPost {
    pub fn is_by(&self, user_id: &UserId) -> bool {
        self.user_id.as_ref() == Some(user_id)
    }

    pub fn clamped_stars(&self) -> u32 {
        self.stars.clamp(0, u32::MAX as i64) as u32
    }
}

/// Catalog entry from the `lessons` table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    pub subject: String,
    /// 1 (easiest) to 5
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
}

fn default_difficulty() -> u8 {
    1
}

/// The subset of a `users` row the engine needs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

impl UserProfile {
    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }
}
