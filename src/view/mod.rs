//! View assembly
//!
//! Turns a fetched snapshot into the two dashboard shapes. Assembly is pure:
//! the same snapshot and context always give the same view. A failed fetch
//! is reported as [`ViewError::DataUnavailable`]; it never turns into a
//! zero-valued view.

mod cache;

pub use cache::ViewCache;

use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::config::FeedSettings;
use crate::domain::{AchievementPost, FeatureId, Role, Snapshot, UserId};
use crate::progress::{
    aggregate, lesson_progress, position_of, rank, recent, recent_completions, summarize,
    CohortSummary, LeaderboardEntry, LessonProgress, LevelProgress, RecentCompletion,
    UserAggregate,
};
use crate::source::SourceError;

/// Who is looking at the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewContext {
    pub user_id: UserId,
    pub role: Role,
}

impl ViewContext {
    pub fn new(user_id: impl Into<UserId>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }
}

#[derive(Debug, Error)]
pub enum ViewError {
    /// The rows behind the view could not be fetched
    #[error("progress data unavailable: {reason}")]
    DataUnavailable { reason: String },

    #[error("user {0} is not in the snapshot")]
    UnknownUser(UserId),

    #[error("the teacher view requires the teacher role")]
    Forbidden,
}

impl From<SourceError> for ViewError {
    fn from(err: SourceError) -> Self {
        Self::DataUnavailable {
            reason: err.to_string(),
        }
    }
}

/// Dashboard for one student
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentView {
    pub display_name: String,
    /// Stored role of the viewed user
    pub role: Role,
    pub aggregate: UserAggregate,
    pub level: LevelProgress,
    pub unlocked: BTreeSet<FeatureId>,
    pub lessons: Vec<LessonProgress>,
    pub recent_achievements: Vec<AchievementPost>,
    pub achievement_count: usize,
    /// Position among all students, None for non-students
    pub rank: Option<u32>,
}

/// Dashboard for a teacher
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeacherView {
    pub summary: CohortSummary,
    /// One aggregate per student, in snapshot order
    pub students: Vec<UserAggregate>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub recent_achievements: Vec<AchievementPost>,
    pub recent_progress: Vec<RecentCompletion>,
}

/// Assemble the student dashboard
pub fn student_view(
    ctx: &ViewContext,
    fetched: Result<Snapshot, SourceError>,
    feed: &FeedSettings,
) -> Result<StudentView, ViewError> {
    let snapshot = fetched?;
    build_student_view(ctx, &snapshot, feed)
}

/// Assemble the teacher dashboard
pub fn teacher_view(
    ctx: &ViewContext,
    fetched: Result<Snapshot, SourceError>,
    feed: &FeedSettings,
) -> Result<TeacherView, ViewError> {
    let snapshot = fetched?;
    build_teacher_view(ctx, &snapshot, feed)
}

pub(crate) fn build_student_view(
    ctx: &ViewContext,
    snapshot: &Snapshot,
    feed: &FeedSettings,
) -> Result<StudentView, ViewError> {
    let profile = snapshot
        .user(&ctx.user_id)
        .ok_or_else(|| ViewError::UnknownUser(ctx.user_id.clone()))?;
    let catalog_size = snapshot.lessons.len();

    // Unlocks follow the stored role, whatever the caller claims
    let agg = aggregate(&ctx.user_id, &snapshot.progress, catalog_size, profile.role);
    let level = LevelProgress::new(agg.completed_lesson_count);
    let lessons = lesson_progress(&ctx.user_id, &snapshot.lessons, &snapshot.progress);

    let own_posts: Vec<AchievementPost> = snapshot.posts_for(&ctx.user_id).cloned().collect();
    let recent_achievements = recent(&own_posts, feed.student_recent);

    let position = if profile.is_student() {
        let board = rank(&student_aggregates(snapshot), &snapshot.users);
        position_of(&board, &ctx.user_id)
    } else {
        None
    };

    debug!(
        user = %ctx.user_id,
        total_stars = agg.total_stars,
        level = agg.level,
        rank = ?position,
        "assembled student view"
    );

    Ok(StudentView {
        display_name: profile.name.clone(),
        role: profile.role,
        unlocked: agg.unlocked.clone(),
        aggregate: agg,
        level,
        lessons,
        recent_achievements,
        achievement_count: own_posts.len(),
        rank: position,
    })
}

pub(crate) fn build_teacher_view(
    ctx: &ViewContext,
    snapshot: &Snapshot,
    feed: &FeedSettings,
) -> Result<TeacherView, ViewError> {
    if ctx.role != Role::Teacher {
        return Err(ViewError::Forbidden);
    }
    let profile = snapshot
        .user(&ctx.user_id)
        .ok_or_else(|| ViewError::UnknownUser(ctx.user_id.clone()))?;
    if profile.role != Role::Teacher {
        return Err(ViewError::Forbidden);
    }

    let students = student_aggregates(snapshot);
    let summary = summarize(&students, snapshot.lessons.len());
    let leaderboard = rank(&students, &snapshot.users);
    let recent_achievements = recent(&snapshot.posts, feed.teacher_recent);
    let recent_progress = recent_completions(
        &snapshot.progress,
        &snapshot.users,
        &snapshot.lessons,
        feed.recent_completions,
    );

    debug!(
        teacher = %ctx.user_id,
        students = summary.total_students,
        active = summary.active_students,
        "assembled teacher view"
    );

    Ok(TeacherView {
        summary,
        students,
        leaderboard,
        recent_achievements,
        recent_progress,
    })
}

/// Student leaderboard on its own, for panels without a viewer
pub fn leaderboard(
    fetched: Result<Snapshot, SourceError>,
) -> Result<Vec<LeaderboardEntry>, ViewError> {
    let snapshot = fetched?;
    Ok(rank(&student_aggregates(&snapshot), &snapshot.users))
}

fn student_aggregates(snapshot: &Snapshot) -> Vec<UserAggregate> {
    let catalog_size = snapshot.lessons.len();
    snapshot
        .students()
        .map(|s| aggregate(&s.id, &snapshot.progress, catalog_size, s.role))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CompletionEvent, Lesson, UserProfile};
    use chrono::{TimeZone, Utc};

    fn snapshot() -> Snapshot {
        let user = |id: &str, name: &str, role| UserProfile {
            id: id.into(),
            name: name.to_string(),
            role,
        };
        let lesson = |id: &str| Lesson {
            id: id.into(),
            title: id.to_uppercase(),
            subject: "Math".to_string(),
            difficulty: 1,
        };
        let done = |user: &str, lesson: &str, stars| CompletionEvent {
            user_id: user.into(),
            lesson_id: lesson.into(),
            score: 90,
            stars,
            completed_at: Some(Utc.with_ymd_and_hms(2025, 4, 2, 12, 0, 0).unwrap()),
        };

        Snapshot {
            users: vec![
                user("s1", "Ravi", Role::Student),
                user("s2", "Priya", Role::Student),
                user("t1", "Ms. Rao", Role::Teacher),
            ],
            lessons: vec![lesson("l1"), lesson("l2")],
            progress: vec![done("s1", "l1", 3), done("s2", "l1", 5), done("s2", "l2", 4)],
            posts: vec![],
        }
    }

    #[test]
    fn test_fetch_failure_is_unavailable() {
        let ctx = ViewContext::new("s1", Role::Student);
        let failed = Err(SourceError::Timeout(std::time::Duration::from_secs(1)));
        let err = student_view(&ctx, failed, &FeedSettings::default()).unwrap_err();
        assert!(matches!(err, ViewError::DataUnavailable { .. }));
    }

    #[test]
    fn test_student_rank_within_cohort() {
        let ctx = ViewContext::new("s1", Role::Student);
        let view = student_view(&ctx, Ok(snapshot()), &FeedSettings::default()).unwrap();
        assert_eq!(view.display_name, "Ravi");
        assert_eq!(view.aggregate.total_stars, 3);
        assert_eq!(view.rank, Some(2));
        assert_eq!(view.lessons.len(), 2);
    }

    #[test]
    fn test_teacher_view_requires_teacher_role() {
        let ctx = ViewContext::new("s1", Role::Student);
        let err = teacher_view(&ctx, Ok(snapshot()), &FeedSettings::default()).unwrap_err();
        assert!(matches!(err, ViewError::Forbidden));
    }

    #[test]
    fn test_teacher_view_excludes_teachers_from_cohort() {
        let ctx = ViewContext::new("t1", Role::Teacher);
        let view = teacher_view(&ctx, Ok(snapshot()), &FeedSettings::default()).unwrap();
        assert_eq!(view.students.len(), 2);
        assert_eq!(view.summary.total_students, 2);
        assert_eq!(view.leaderboard[0].display_name, "Priya");
        assert_eq!(view.recent_progress.len(), 3);
    }

    #[test]
    fn test_teacher_view_checks_stored_role() {
        let ctx = ViewContext::new("s2", Role::Teacher);
        let err = teacher_view(&ctx, Ok(snapshot()), &FeedSettings::default()).unwrap_err();
        assert!(matches!(err, ViewError::Forbidden));
    }

    #[test]
    fn test_leaderboard_without_viewer() {
        let board = leaderboard(Ok(snapshot())).unwrap();
        let names: Vec<&str> = board.iter().map(|e| e.display_name.as_str()).collect();
        assert_eq!(names, vec!["Priya", "Ravi"]);
    }

    #[test]
    fn test_student_view_uses_stored_role() {
        let claimed_teacher = ViewContext::new("s1", Role::Teacher);
        let view = student_view(&claimed_teacher, Ok(snapshot()), &FeedSettings::default()).unwrap();
        assert_eq!(view.role, Role::Student);
        assert!(!view.unlocked.contains(&FeatureId::TeachersRoom));
        assert_eq!(view.rank, Some(2));

        let claimed_student = ViewContext::new("t1", Role::Student);
        let view = student_view(&claimed_student, Ok(snapshot()), &FeedSettings::default()).unwrap();
        assert_eq!(view.role, Role::Teacher);
        assert!(view.unlocked.contains(&FeatureId::TeachersRoom));
        assert_eq!(view.aggregate.unlocked, view.unlocked);
        assert_eq!(view.rank, None);
    }

    #[test]
    fn test_student_view_json_carries_level_badge() {
        let ctx = ViewContext::new("s2", Role::Student);
        let view = student_view(&ctx, Ok(snapshot()), &FeedSettings::default()).unwrap();
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["role"], "student");
        assert_eq!(json["level"]["level"], 1);
        // 2 of the 4 lessons needed for level 2
        assert_eq!(json["level"]["progress_to_next"], 0.5);
    }

    #[test]
    fn test_unknown_user() {
        let ctx = ViewContext::new("nobody", Role::Student);
        let err = student_view(&ctx, Ok(snapshot()), &FeedSettings::default()).unwrap_err();
        assert!(matches!(err, ViewError::UnknownUser(_)));
    }
}
