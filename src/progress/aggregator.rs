//! Per-user aggregation of completion events
//!
//! Duplicate `(user, lesson)` rows are retries: only the best attempt per
//! lesson counts, and the lesson is counted once.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use super::levels::Level;
use super::unlocks::unlocked;
use crate::domain::{CompletionEvent, FeatureId, Lesson, LessonId, Role, UserId};

/// Everything derived about one user's progress
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserAggregate {
    pub user_id: UserId,
    pub total_stars: u32,
    pub completed_lesson_count: u32,
    /// 0.0 - 100.0
    pub completion_percentage: f64,
    pub level: u32,
    pub unlocked: BTreeSet<FeatureId>,
}

/// Aggregate one user's events
///
/// Events belonging to other users are skipped, so the whole `progress`
/// table can be passed in. The result does not depend on event order.
pub fn aggregate<'a, I>(user_id: &UserId, events: I, catalog_size: usize, role: Role) -> UserAggregate
where
    I: IntoIterator<Item = &'a CompletionEvent>,
{
    let mut best_stars: BTreeMap<&LessonId, u32> = BTreeMap::new();
    let mut rows = 0usize;

    for event in events.into_iter().filter(|e| &e.user_id == user_id) {
        rows += 1;
        let stars = event.clamped_stars();
        best_stars
            .entry(&event.lesson_id)
            .and_modify(|best| *best = (*best).max(stars))
            .or_insert(stars);
    }

    let total_stars: u32 = best_stars.values().sum();
    let completed_lesson_count = best_stars.len() as u32;

    debug!(
        user = %user_id,
        rows,
        lessons = completed_lesson_count,
        total_stars,
        "aggregated completion events"
    );

    UserAggregate {
        user_id: user_id.clone(),
        total_stars,
        completed_lesson_count,
        completion_percentage: completion_percentage(completed_lesson_count, catalog_size),
        level: Level::for_lessons(completed_lesson_count).level,
        unlocked: unlocked(total_stars, role),
    }
}

/// Share of the catalog completed, clamped to `0.0..=100.0`
///
/// An empty catalog yields 0.
pub fn completion_percentage(completed: u32, catalog_size: usize) -> f64 {
    if catalog_size == 0 {
        return 0.0;
    }
    (completed as f64 / catalog_size as f64 * 100.0).clamp(0.0, 100.0)
}

/// Best recorded attempt at a lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attempt {
    pub stars: u32,
    pub score: u32,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Attempt {
    fn from_event(event: &CompletionEvent) -> Self {
        Self {
            stars: event.clamped_stars(),
            score: event.clamped_score(),
            completed_at: event.completed_at,
        }
    }

    /// Ordering key: more stars, then higher score, then more recent.
    /// An undated attempt loses to any dated one.
    fn rank_key(&self) -> (u32, u32, Option<DateTime<Utc>>) {
        (self.stars, self.score, self.completed_at)
    }
}

/// Lesson card state for the student's lesson list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonProgress {
    pub lesson: Lesson,
    pub best: Option<Attempt>,
}

impl LessonProgress {
    pub fn is_completed(&self) -> bool {
        self.best.is_some()
    }
}

/// Pair every catalog lesson with the user's best attempt
///
/// Lessons come back easiest first, then by id.
pub fn lesson_progress<'a, I>(user_id: &UserId, catalog: &[Lesson], events: I) -> Vec<LessonProgress>
where
    I: IntoIterator<Item = &'a CompletionEvent>,
{
    let mut best: BTreeMap<&LessonId, Attempt> = BTreeMap::new();
    for event in events.into_iter().filter(|e| &e.user_id == user_id) {
        let attempt = Attempt::from_event(event);
        let better = best
            .get(&event.lesson_id)
            .is_none_or(|current| attempt.rank_key() > current.rank_key());
        if better {
            best.insert(&event.lesson_id, attempt);
        }
    }

    let mut lessons: Vec<&Lesson> = catalog.iter().collect();
    lessons.sort_by(|a, b| a.difficulty.cmp(&b.difficulty).then_with(|| a.id.cmp(&b.id)));

    lessons
        .into_iter()
        .map(|lesson| LessonProgress {
            lesson: lesson.clone(),
            best: best.get(&lesson.id).cloned(),
        })
        .collect()
}
