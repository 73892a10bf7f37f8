use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One cleaned roster row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RosterEntry {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub previous_last_name: Option<String>,
    pub department: String,
    pub track: String,
}

impl RosterEntry {
    /// Display name used in output rows, e.g. "Maria Chen"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn identity(&self) -> FacultyIdentity {
        FacultyIdentity {
            full_name: self.full_name(),
            department: self.department.clone(),
            track: self.track.clone(),
        }
    }
}

/// Department and career track resolved for one author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FacultyIdentity {
    pub full_name: String,
    pub department: String,
    pub track: String,
}

/// Track recorded for identities found through affiliation text only
pub const UNKNOWN_TRACK: &str = "-";
