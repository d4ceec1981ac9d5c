//! Student dashboard command

use anyhow::Result;
use std::path::Path;

use starmap::config::Config;
use starmap::progress::{locked, stars_needed};
use starmap::view::{self, ViewContext};
use starmap::{Role, MAX_LESSON_STARS};

use super::{fetch_snapshot, print_json, star_bar};

/// Print a student's stars, level, map unlocks and lessons
pub async fn student_command(
    work_dir: &Path,
    config: &Config,
    user_id: String,
    json: bool,
) -> Result<()> {
    let ctx = ViewContext::new(user_id, Role::Student);
    let fetched = fetch_snapshot(work_dir, config).await;
    let view = view::student_view(&ctx, fetched, &config.feed)?;

    if json {
        return print_json(&view);
    }

    let agg = &view.aggregate;
    println!("{} ({})\n", view.display_name, agg.user_id);
    println!("  Stars:     {}", agg.total_stars);
    println!(
        "  Lessons:   {} completed ({:.0}%)",
        agg.completed_lesson_count, agg.completion_percentage
    );
    let level = &view.level;
    match level.next_level_lessons {
        Some(next) if !level.is_max_level() => println!(
            "  Level:     {} ({}/{} lessons, {:.0}% to next)",
            level.level,
            level.completed_lessons,
            next,
            level.progress_to_next * 100.0
        ),
        _ => println!("  Level:     {} (max)", level.level),
    }
    if let Some(rank) = view.rank {
        println!("  Rank:      #{}", rank);
    }

    println!("\nVillage map:");
    for feature in &view.unlocked {
        println!("  [open]   {}", feature.label());
    }
    for feature in locked(agg.total_stars, view.role) {
        match stars_needed(feature, agg.total_stars) {
            Some(needed) => println!("  [locked] {} ({} more stars)", feature.label(), needed),
            None => println!("  [locked] {}", feature.label()),
        }
    }

    println!("\nLessons:");
    for card in &view.lessons {
        match &card.best {
            Some(best) => println!(
                "  {} {:<28} {:>3}%  {}",
                star_bar(best.stars, MAX_LESSON_STARS),
                card.lesson.title,
                best.score,
                card.lesson.subject
            ),
            None => println!(
                "  {} {:<28}   -   {}",
                star_bar(0, MAX_LESSON_STARS),
                card.lesson.title,
                card.lesson.subject
            ),
        }
    }

    if !view.recent_achievements.is_empty() {
        println!("\nAchievements ({}):", view.achievement_count);
        for post in &view.recent_achievements {
            println!(
                "  {}  {} (+{} stars)",
                post.created_at.format("%Y-%m-%d"),
                post.achievement,
                post.clamped_stars()
            );
        }
    }

    Ok(())
}
