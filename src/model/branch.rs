use serde::{Deserialize, Serialize};

use super::common::{EntityRef, Timestamps};

/// A department inside a college, headed by an HOD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub college: Option<EntityRef>,
    #[serde(default)]
    pub hod: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub sections: Vec<EntityRef>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

/// Payload for `POST /branches`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBranch {
    pub name: String,
    pub college_id: String,
}

/// A class group inside a branch, run by a coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub college: Option<EntityRef>,
    #[serde(default)]
    pub branch: Option<EntityRef>,
    #[serde(default)]
    pub coordinator: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

/// Payload for `POST /sections`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSection {
    pub name: String,
    pub branch_id: String,
}
