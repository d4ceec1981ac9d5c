//! Class-wide totals for the teacher dashboard

use serde::Serialize;

use super::aggregator::UserAggregate;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CohortSummary {
    pub total_students: u32,
    /// Students with at least one completed lesson
    pub active_students: u32,
    pub total_lessons: u32,
    /// Mean of the students' star totals (0.0 for an empty cohort)
    pub average_stars: f64,
}

impl CohortSummary {
    pub fn inactive_students(&self) -> u32 {
        self.total_students - self.active_students
    }
}

pub fn summarize(cohort: &[UserAggregate], catalog_size: usize) -> CohortSummary {
    let total_students = cohort.len() as u32;
    let active_students = cohort
        .iter()
        .filter(|a| a.completed_lesson_count > 0)
        .count() as u32;
    let star_sum: u64 = cohort.iter().map(|a| a.total_stars as u64).sum();

    let average_stars = if cohort.is_empty() {
        0.0
    } else {
        star_sum as f64 / cohort.len() as f64
    };

    CohortSummary {
        total_students,
        active_students,
        total_lessons: catalog_size as u32,
        average_stars,
    }
}
