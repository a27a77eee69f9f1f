//! Project type catalogue.
//!
//! The numeric ids are shared with existing clients and are persisted in the
//! `projects.type` column, so they must never be renumbered.

use serde::Serialize;

/// Kind of renewable asset a project represents.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProjectType {
    None = 0,
    BiomassGasification = 1,
    BiogasElectricity = 2,
    ModelS = 3,
}

impl ProjectType {
    /// Resolve a stored type id. Unknown ids yield `None`.
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::None),
            1 => Some(Self::BiomassGasification),
            2 => Some(Self::BiogasElectricity),
            3 => Some(Self::ModelS),
            _ => None,
        }
    }

    pub fn id(self) -> i16 {
        self as i16
    }

    /// Human-readable name shown alongside the type id.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::BiomassGasification => "Biomass to Gasification",
            Self::BiogasElectricity => "Biogas to Electricity",
            Self::ModelS => "Model S",
        }
    }
}
