use serde::{Deserialize, Serialize};

use super::common::{EntityRef, Location, Timestamps};

/// A college registered on the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct College {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: Location,
    /// Join code shared with members. Only returned to privileged users.
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub branches: Vec<EntityRef>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

/// Payload for `POST /colleges`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateCollege {
    pub name: String,
    pub location: Location,
}

impl CreateCollege {
    pub fn new(name: impl Into<String>, city: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: Location {
                city: city.into(),
                state: state.into(),
            },
        }
    }
}
