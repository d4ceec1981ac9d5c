//! Achievement feed and recent-activity views
//!
//! Newest first. Rows with equal timestamps keep their input order so the
//! feed does not flicker between refreshes.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{AchievementPost, CompletionEvent, Lesson, LessonId, UserId, UserProfile};

/// Newest `limit` posts
///
/// `limit <= 0` yields nothing. The input slice is left untouched.
pub fn recent(posts: &[AchievementPost], limit: i64) -> Vec<AchievementPost> {
    newest_first(posts, limit, |p| p.created_at)
        .into_iter()
        .cloned()
        .collect()
}

/// One row of the teacher's "recent progress" tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentCompletion {
    pub user_id: UserId,
    pub student_name: Option<String>,
    pub lesson_id: LessonId,
    pub lesson_title: Option<String>,
    pub stars: u32,
    pub score: u32,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Newest `limit` completions across all users, joined with names and titles
///
/// Unknown users or lessons keep the row with the name left empty. Undated
/// completions come after every dated one.
pub fn recent_completions(
    events: &[CompletionEvent],
    users: &[UserProfile],
    lessons: &[Lesson],
    limit: i64,
) -> Vec<RecentCompletion> {
    let names: HashMap<&UserId, &str> = users.iter().map(|u| (&u.id, u.name.as_str())).collect();
    let titles: HashMap<&LessonId, &str> =
        lessons.iter().map(|l| (&l.id, l.title.as_str())).collect();

    newest_first(events, limit, |e| e.completed_at)
        .into_iter()
        .map(|e| RecentCompletion {
            user_id: e.user_id.clone(),
            student_name: names.get(&e.user_id).map(|n| n.to_string()),
            lesson_id: e.lesson_id.clone(),
            lesson_title: titles.get(&e.lesson_id).map(|t| t.to_string()),
            stars: e.clamped_stars(),
            score: e.clamped_score(),
            completed_at: e.completed_at,
        })
        .collect()
}

fn newest_first<T, K, F>(rows: &[T], limit: i64, timestamp: F) -> Vec<&T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    if limit <= 0 {
        return Vec::new();
    }

    let mut ordered: Vec<&T> = rows.iter().collect();
    // sort_by is stable: equal timestamps keep input order
    ordered.sort_by(|a, b| timestamp(b).cmp(&timestamp(a)));
    ordered.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    ordered
}
