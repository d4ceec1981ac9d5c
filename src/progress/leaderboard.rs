//! Cohort leaderboard
//!
//! Ordering is total: most stars first, ties broken by ascending user id.
//! Every entry gets its own rank, ties included.

use std::collections::HashMap;

use serde::Serialize;

use super::aggregator::UserAggregate;
use crate::domain::{UserId, UserProfile};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub user_id: UserId,
    pub display_name: String,
    pub total_stars: u32,
    /// 1-based position
    pub rank: u32,
}

/// Rank a cohort
///
/// `directory` supplies display names; users missing from it are shown by id.
pub fn rank(cohort: &[UserAggregate], directory: &[UserProfile]) -> Vec<LeaderboardEntry> {
    let names: HashMap<&UserId, &str> = directory
        .iter()
        .map(|u| (&u.id, u.name.as_str()))
        .collect();

    let mut ordered: Vec<&UserAggregate> = cohort.iter().collect();
    ordered.sort_by(|a, b| {
        b.total_stars
            .cmp(&a.total_stars)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    ordered
        .into_iter()
        .enumerate()
        .map(|(i, agg)| LeaderboardEntry {
            user_id: agg.user_id.clone(),
            display_name: names
                .get(&agg.user_id)
                .map(|n| n.to_string())
                .unwrap_or_else(|| agg.user_id.to_string()),
            total_stars: agg.total_stars,
            rank: i as u32 + 1,
        })
        .collect()
}

/// First `n` entries of an already ranked board
pub fn top(entries: &[LeaderboardEntry], n: usize) -> &[LeaderboardEntry] {
    &entries[..n.min(entries.len())]
}

/// Rank of one user on a ranked board
pub fn position_of(entries: &[LeaderboardEntry], user_id: &UserId) -> Option<u32> {
    entries
        .iter()
        .find(|e| &e.user_id == user_id)
        .map(|e| e.rank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use std::collections::BTreeSet;

    fn agg(id: &str, stars: u32) -> UserAggregate {
        UserAggregate {
            user_id: id.into(),
            total_stars: stars,
            completed_lesson_count: 0,
            completion_percentage: 0.0,
            level: 1,
            unlocked: BTreeSet::new(),
        }
    }

    fn profile(id: &str, name: &str) -> UserProfile {
        UserProfile {
            id: id.into(),
            name: name.to_string(),
            role: Role::Student,
        }
    }

    fn ranks(board: &[LeaderboardEntry]) -> Vec<(&str, u32)> {
        board.iter().map(|e| (e.user_id.as_str(), e.rank)).collect()
    }

    #[test]
    fn test_ties_get_distinct_ranks() {
        let board = rank(&[agg("A", 10), agg("B", 10), agg("C", 7)], &[]);
        assert_eq!(ranks(&board), vec![("A", 1), ("B", 2), ("C", 3)]);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let forward = rank(&[agg("A", 10), agg("B", 10), agg("C", 7)], &[]);
        let shuffled = rank(&[agg("C", 7), agg("B", 10), agg("A", 10)], &[]);
        assert_eq!(forward, shuffled);
    }

    #[test]
    fn test_empty_cohort() {
        assert!(rank(&[], &[]).is_empty());
    }

    #[test]
    fn test_display_names() {
        let board = rank(&[agg("u1", 3), agg("u2", 5)], &[profile("u1", "Ravi Kumar")]);
        assert_eq!(board[0].display_name, "u2");
        assert_eq!(board[1].display_name, "Ravi Kumar");
    }

    #[test]
    fn test_top_and_position() {
        let board = rank(&[agg("a", 1), agg("b", 2), agg("c", 3)], &[]);
        assert_eq!(top(&board, 2).len(), 2);
        assert_eq!(top(&board, 10).len(), 3);
        assert_eq!(position_of(&board, &"a".into()), Some(3));
        assert_eq!(position_of(&board, &"zz".into()), None);
    }
}
