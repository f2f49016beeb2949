use std::fmt;

use crate::model::LeaderboardScope;

/// Top-level grouping of cached queries, used for bulk invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Scope {
    College,
    Branch,
    Section,
    Leaderboard,
}

/// Identity of one cached read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Colleges,
    CollegeDetails(String),
    CollegeStats(String),
    BranchDetails(String),
    BranchStats(String),
    SectionDetails(String),
    SectionStats(String),
    Leaderboard(LeaderboardScope),
}

impl QueryKey {
    pub fn scope(&self) -> Scope {
        match self {
            QueryKey::Colleges | QueryKey::CollegeDetails(_) | QueryKey::CollegeStats(_) => {
                Scope::College
            }
            QueryKey::BranchDetails(_) | QueryKey::BranchStats(_) => Scope::Branch,
            QueryKey::SectionDetails(_) | QueryKey::SectionStats(_) => Scope::Section,
            QueryKey::Leaderboard(_) => Scope::Leaderboard,
        }
    }

    pub fn is_leaderboard(&self) -> bool {
        self.scope() == Scope::Leaderboard
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::Colleges => write!(f, "colleges"),
            QueryKey::CollegeDetails(id) => write!(f, "college/{id}/details"),
            QueryKey::CollegeStats(id) => write!(f, "college/{id}/stats"),
            QueryKey::BranchDetails(id) => write!(f, "branch/{id}/details"),
            QueryKey::BranchStats(id) => write!(f, "branch/{id}/stats"),
            QueryKey::SectionDetails(id) => write!(f, "section/{id}/details"),
            QueryKey::SectionStats(id) => write!(f, "section/{id}/stats"),
            QueryKey::Leaderboard(scope) => write!(f, "leaderboard/{}/{}", scope.kind(), scope.region()),
        }
    }
}
