//! Teacher dashboard command

use anyhow::Result;
use std::path::Path;

use starmap::config::Config;
use starmap::view::{self, ViewContext};
use starmap::Role;

use super::{fetch_snapshot, format_day, print_json};

/// Print the class summary, per-student progress and recent activity
pub async fn teacher_command(
    work_dir: &Path,
    config: &Config,
    user_id: String,
    json: bool,
) -> Result<()> {
    let ctx = ViewContext::new(user_id, Role::Teacher);
    let fetched = fetch_snapshot(work_dir, config).await;
    let view = view::teacher_view(&ctx, fetched, &config.feed)?;

    if json {
        return print_json(&view);
    }

    let summary = &view.summary;
    println!("Class overview\n");
    println!("  Students:      {}", summary.total_students);
    println!(
        "  Active:        {} ({} not started)",
        summary.active_students,
        summary.inactive_students()
    );
    println!("  Lessons:       {}", summary.total_lessons);
    println!("  Average stars: {:.1}", summary.average_stars);

    if view.leaderboard.is_empty() {
        println!("\nNo students found.");
        return Ok(());
    }

    println!("\nStudents ({}):\n", view.leaderboard.len());
    for entry in &view.leaderboard {
        let agg = view.students.iter().find(|a| a.user_id == entry.user_id);
        match agg {
            Some(agg) => println!(
                "  #{:<3} {:<20} {:>3} stars  level {}  {:>3.0}%",
                entry.rank,
                entry.display_name,
                entry.total_stars,
                agg.level,
                agg.completion_percentage
            ),
            None => println!("  #{:<3} {:<20} {:>3} stars", entry.rank, entry.display_name, entry.total_stars),
        }
    }

    if !view.recent_progress.is_empty() {
        println!("\nRecent progress:");
        for row in &view.recent_progress {
            println!(
                "  {}  {} - {} ({} stars, {}%)",
                format_day(row.completed_at),
                row.student_name.as_deref().unwrap_or(row.user_id.as_str()),
                row.lesson_title.as_deref().unwrap_or(row.lesson_id.as_str()),
                row.stars,
                row.score
            );
        }
    }

    if !view.recent_achievements.is_empty() {
        println!("\nCommunity wall:");
        for post in &view.recent_achievements {
            println!(
                "  {}  {}: {}",
                post.created_at.format("%Y-%m-%d"),
                post.user_id.as_ref().map_or("(unknown)", |id| id.as_str()),
                post.achievement
            );
        }
    }

    Ok(())
}
