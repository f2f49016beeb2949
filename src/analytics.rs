//! Presentation aggregates derived from fetched records.
//!
//! Nothing here talks to the network; every function works on data the
//! backend already returned. Missing counts are zero by construction.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use itertools::Itertools;
use serde::Serialize;
use strum_macros::EnumString;

use crate::model::{LeaderboardEntry, LeetCodeCounts, PlatformTotals, ProblemsSolved};

/// How a leaderboard table is ordered.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, strum_macros::Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortKey {
    /// Server-assigned rank, ascending.
    #[default]
    Rank,
    /// Score, highest first.
    Score,
    /// LeetCode easy + medium + hard + GeeksforGeeks, highest first.
    Problems,
}

/// Total problems solved: LeetCode easy + medium + hard plus GeeksforGeeks.
pub fn total_problems(leetcode: &LeetCodeCounts, gfg: u64) -> u64 {
    leetcode.total() + gfg
}

/// `part` as a percentage of `whole`, rounded to one decimal. Zero when `whole` is zero.
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 * 1000.0 / whole as f64).round() / 10.0
}

/// LeetCode difficulty shares, each in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DifficultySplit {
    pub easy: f64,
    pub medium: f64,
    pub hard: f64,
}

pub fn difficulty_split(leetcode: &LeetCodeCounts) -> DifficultySplit {
    let total = leetcode.total();
    DifficultySplit {
        easy: percentage(leetcode.easy, total),
        medium: percentage(leetcode.medium, total),
        hard: percentage(leetcode.hard, total),
    }
}

/// Order entries by `key`. Score and problem ties fall back to server rank.
/// The sort is stable, so entries that still compare equal keep server order.
pub fn sort_entries(entries: &[LeaderboardEntry], key: SortKey) -> Vec<LeaderboardEntry> {
    entries
        .iter()
        .cloned()
        .sorted_by(|a, b| compare(a, b, key))
        .collect()
}

fn compare(a: &LeaderboardEntry, b: &LeaderboardEntry, key: SortKey) -> Ordering {
    let primary = match key {
        SortKey::Rank => Ordering::Equal,
        SortKey::Score => b.score.total_cmp(&a.score),
        SortKey::Problems => b.problems_solved().cmp(&a.problems_solved()),
    };
    primary.then_with(|| a.rank.cmp(&b.rank))
}

/// Pair each item with its 1-based display position in the given order.
pub fn rerank<T>(items: impl IntoIterator<Item = T>) -> impl Iterator<Item = (usize, T)> {
    items.into_iter().enumerate().map(|(i, item)| (i + 1, item))
}

/// Entries whose name contains `term`, ignoring case. A blank term keeps everything.
pub fn filter_by_name<'a>(entries: &'a [LeaderboardEntry], term: &str) -> Vec<&'a LeaderboardEntry> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return entries.iter().collect();
    }
    entries
        .iter()
        .filter(|e| e.name.to_lowercase().contains(&term))
        .collect()
}

/// One row of a per-branch or per-section breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub name: String,
    pub totals: PlatformTotals,
    pub problems: u64,
    /// This group's share of all problems solved across the breakdown.
    pub share: f64,
}

/// Flatten a name → totals map into rows ordered by problems solved, highest first.
pub fn breakdown(groups: &BTreeMap<String, PlatformTotals>) -> Vec<GroupSummary> {
    let grand_total: u64 = groups.values().map(|t| t.problems_solved()).sum();
    groups
        .iter()
        .map(|(name, totals)| {
            let problems = totals.problems_solved();
            GroupSummary {
                name: name.clone(),
                totals: *totals,
                problems,
                share: percentage(problems, grand_total),
            }
        })
        .sorted_by(|a, b| b.problems.cmp(&a.problems).then_with(|| a.name.cmp(&b.name)))
        .collect()
}
