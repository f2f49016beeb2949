use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::stats::{LeetCodeCounts, ProblemsSolved};

/// Geographic scope of a leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum LeaderboardScope {
    /// All of India.
    National,
    State(String),
    City(String),
}

impl LeaderboardScope {
    /// The region name sent in the URL path. The national board uses `india`.
    pub fn region(&self) -> &str {
        match self {
            LeaderboardScope::National => "india",
            LeaderboardScope::State(name) | LeaderboardScope::City(name) => name,
        }
    }

    /// The first path segment after `/leaderboard/`.
    pub fn kind(&self) -> &'static str {
        match self {
            LeaderboardScope::National => "india",
            LeaderboardScope::State(_) => "state",
            LeaderboardScope::City(_) => "city",
        }
    }
}

/// Response body of every `/leaderboard/*` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

/// One ranked student on a leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    #[serde(default)]
    pub rank: u32,
    #[serde(alias = "_id", alias = "user")]
    pub user_id: String,
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
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProblemsSolved for LeaderboardEntry {
    fn leetcode(&self) -> &LeetCodeCounts {
        &self.leetcode
    }

    fn gfg(&self) -> u64 {
        self.gfg
    }
}
