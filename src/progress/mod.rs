//! Progress derivation: stars, levels, unlocks, leaderboard and feeds
//!
//! Every function here is pure. Callers hand in rows from a [`Snapshot`]
//! and get plain, serializable values back.
//!
//! [`Snapshot`]: crate::domain::Snapshot

mod aggregator;
mod cohort;
mod feed;
mod leaderboard;
mod levels;
mod unlocks;

pub use aggregator::{
    aggregate, completion_percentage, lesson_progress, Attempt, LessonProgress, UserAggregate,
};
pub use cohort::{summarize, CohortSummary};
pub use feed::{recent, recent_completions, RecentCompletion};
pub use leaderboard::{position_of, rank, top, LeaderboardEntry};
pub use levels::{Level, LevelProgress, LEVELS};
pub use unlocks::{
    locked, requirement, stars_needed, unlocked, Requirement, PLAYGROUND_STARS, UNLOCK_RULES,
};
