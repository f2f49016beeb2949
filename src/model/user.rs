use serde::{Deserialize, Serialize};
use strum_macros::EnumString;

use super::common::EntityRef;

/// The fixed set of roles a platform user can hold.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    Hod,
    Coordinator,
    Student,
    Recruiter,
}

impl Role {
    pub fn can_create_college(self) -> bool {
        self == Role::Hod
    }

    /// Only a Head of Department may open a branch.
    pub fn can_create_branch(self) -> bool {
        self == Role::Hod
    }

    pub fn can_create_section(self) -> bool {
        self == Role::Coordinator
    }
}

/// A platform user as returned alongside details and stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub college: Option<EntityRef>,
    #[serde(default)]
    pub branch: Option<EntityRef>,
    #[serde(default)]
    pub section: Option<EntityRef>,
    #[serde(default)]
    pub score: f64,
}
