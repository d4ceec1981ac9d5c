//! Level system
//!
//! Levels are earned by completing distinct lessons, not by collecting stars.

use serde::Serialize;

/// Level definition
#[derive(Debug, Clone)]
pub struct Level {
    pub level: u32,
    pub lessons_required: u32,
}

/// All level definitions (must be sorted by level)
pub static LEVELS: &[Level] = &[
    Level {
        level: 1,
        lessons_required: 0,
    },
    Level {
        level: 2,
        lessons_required: 4,
    },
    Level {
        level: 3,
        lessons_required: 6,
    },
    Level {
        level: 4,
        lessons_required: 8,
    },
    Level {
        level: 5,
        lessons_required: 10,
    },
];

impl Level {
    /// Level reached with the given number of completed lessons
    pub fn for_lessons(completed: u32) -> &'static Level {
        LEVELS
            .iter()
            .rev()
            .find(|l| completed >= l.lessons_required)
            .unwrap_or(&LEVELS[0])
    }

    /// Lessons needed for the level after `current_level` (None if max level)
    pub fn lessons_for_next(current_level: u32) -> Option<u32> {
        LEVELS
            .iter()
            .find(|l| l.level == current_level + 1)
            .map(|l| l.lessons_required)
    }

    pub fn max_level() -> u32 {
        LEVELS.last().map(|l| l.level).unwrap_or(1)
    }
}

/// Level badge shown on the student profile
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LevelProgress {
    pub completed_lessons: u32,
    pub level: u32,
    /// Lessons needed for the current level
    pub current_level_lessons: u32,
    /// Lessons needed for the next level (None if max)
    pub next_level_lessons: Option<u32>,
    /// Progress towards the next level (0.0 - 1.0), 1.0 at max level
    pub progress_to_next: f32,
}

impl LevelProgress {
    pub fn new(completed_lessons: u32) -> Self {
        let info = Level::for_lessons(completed_lessons);
        let next_level_lessons = Level::lessons_for_next(info.level);
        let progress_to_next = match next_level_lessons {
            Some(next) if next > info.lessons_required => {
                let in_level = completed_lessons - info.lessons_required;
                in_level as f32 / (next - info.lessons_required) as f32
            }
            _ => 1.0,
        };

        Self {
            completed_lessons,
            level: info.level,
            current_level_lessons: info.lessons_required,
            next_level_lessons,
            progress_to_next,
        }
    }

    pub fn is_max_level(&self) -> bool {
        self.next_level_lessons.is_none()
    }
}
