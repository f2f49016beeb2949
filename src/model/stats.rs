use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Anything that has a LeetCode + GeeksforGeeks solved count.
pub trait ProblemsSolved {
    fn leetcode(&self) -> &LeetCodeCounts;
    fn gfg(&self) -> u64;

    /// LeetCode easy + medium + hard plus GeeksforGeeks.
    fn problems_solved(&self) -> u64 {
        self.leetcode().total() + self.gfg()
    }
}

/// LeetCode problems solved, split by difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeetCodeCounts {
    #[serde(default)]
    pub easy: u64,
    #[serde(default)]
    pub medium: u64,
    #[serde(default)]
    pub hard: u64,
}

impl LeetCodeCounts {
    pub fn total(&self) -> u64 {
        self.easy + self.medium + self.hard
    }
}

/// Summed platform counts for an entity or group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformTotals {
    #[serde(default)]
    pub leetcode: LeetCodeCounts,
    #[serde(default)]
    pub gfg: u64,
    #[serde(default)]
    pub github_repos: u64,
}

impl ProblemsSolved for PlatformTotals {
    fn leetcode(&self) -> &LeetCodeCounts {
        &self.leetcode
    }

    fn gfg(&self) -> u64 {
        self.gfg
    }
}

impl std::ops::Add for PlatformTotals {
    type Output = PlatformTotals;

    fn add(self, rhs: Self) -> Self::Output {
        PlatformTotals {
            leetcode: LeetCodeCounts {
                easy: self.leetcode.easy + rhs.leetcode.easy,
                medium: self.leetcode.medium + rhs.leetcode.medium,
                hard: self.leetcode.hard + rhs.leetcode.hard,
            },
            gfg: self.gfg + rhs.gfg,
            github_repos: self.github_repos + rhs.github_repos,
        }
    }
}

impl std::iter::Sum for PlatformTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(PlatformTotals::default(), |acc, t| acc + t)
    }
}

/// Per-student averages across platforms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformAverages {
    #[serde(default)]
    pub easy: f64,
    #[serde(default)]
    pub medium: f64,
    #[serde(default)]
    pub hard: f64,
    #[serde(default)]
    pub gfg: f64,
    #[serde(default)]
    pub github_repos: f64,
    #[serde(default)]
    pub score: f64,
}

/// A student featured in a stats snapshot's top list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopStudent {
    #[serde(rename = "_id", alias = "id", alias = "userId")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub leetcode: LeetCodeCounts,
    #[serde(default)]
    pub gfg: u64,
    #[serde(default)]
    pub github_repos: u64,
}

impl ProblemsSolved for TopStudent {
    fn leetcode(&self) -> &LeetCodeCounts {
        &self.leetcode
    }

    fn gfg(&self) -> u64 {
        self.gfg
    }
}

/// Aggregated statistics for a college, branch or section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    #[serde(default)]
    pub totals: PlatformTotals,
    #[serde(default)]
    pub averages: PlatformAverages,
    #[serde(default)]
    pub top_students: Vec<TopStudent>,
    /// Breakdown by branch name (college stats only).
    #[serde(default)]
    pub branches: BTreeMap<String, PlatformTotals>,
    /// Breakdown by section name (branch stats only).
    #[serde(default)]
    pub sections: BTreeMap<String, PlatformTotals>,
    #[serde(default)]
    pub student_count: u64,
    #[serde(default)]
    pub branch_count: u64,
    #[serde(default)]
    pub section_count: u64,
}

impl ProblemsSolved for StatsSnapshot {
    fn leetcode(&self) -> &LeetCodeCounts {
        &self.totals.leetcode
    }

    fn gfg(&self) -> u64 {
        self.totals.gfg
    }
}
