//! Core domain types for starmap

mod ids;
mod records;
mod snapshot;

pub use ids::{FeatureId, LessonId, PostId, Role, UserId};
pub use records::{
    AchievementPost, CompletionEvent, Lesson, UserProfile, MAX_LESSON_STARS, MAX_SCORE,
};
pub use snapshot::Snapshot;
