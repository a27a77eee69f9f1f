//! Project lifecycle status persisted in `projects.status` (SMALLINT).
//!
//! The set of states is closed. A row holding any other value fails to decode
//! instead of surfacing as an unknown status.

use serde::{Deserialize, Serialize};

/// Status ID type matching SMALLINT in the database.
pub type StatusId = i16;

/// Project lifecycle status. New projects start as `Registered`; any state
/// may follow any other through an explicit status change.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Rejected = -1,
    Registered = 1,
    Active = 20,
}

impl ProjectStatus {
    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Resolve a wire/database status ID. `None` for values outside the set.
    pub fn from_id(id: StatusId) -> Option<Self> {
        match id {
            -1 => Some(Self::Rejected),
            1 => Some(Self::Registered),
            20 => Some(Self::Active),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Rejected => "rejected",
            Self::Registered => "registered",
            Self::Active => "active",
        }
    }
}

impl From<ProjectStatus> for StatusId {
    fn from(value: ProjectStatus) -> Self {
        value as StatusId
    }
}
