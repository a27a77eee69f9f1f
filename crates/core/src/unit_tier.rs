//! Coarse capacity buckets used when listing projects by size.
//!
//! Callers select a tier (1, 2 or 3) instead of a raw capacity. The tier is
//! translated into a range on the `unit` column using a threshold table keyed
//! on the project type:
//!
//! | tier | range                      |
//! |------|----------------------------|
//! | 1    | `low <= unit < mid`        |
//! | 2    | `mid <= unit <= high`      |
//! | 3    | `unit > high`              |
//!
//! Tier 2 is closed on its upper bound, so a project sitting exactly on
//! `high` belongs to tier 2 and not to tier 3.

use std::ops::Bound;

use crate::project_type::ProjectType;

/// Caller-selected capacity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitTier {
    Small,
    Medium,
    Large,
}

impl UnitTier {
    /// Parse the wire selector. `0` and anything outside `1..=3` select no tier.
    pub fn from_selector(selector: i16) -> Option<Self> {
        match selector {
            1 => Some(Self::Small),
            2 => Some(Self::Medium),
            3 => Some(Self::Large),
            _ => None,
        }
    }
}

/// Threshold table for one project type family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierThresholds {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

const GASIFICATION_THRESHOLDS: TierThresholds = TierThresholds {
    low: 0.0,
    mid: 20.0,
    high: 100.0,
};

const BIOGAS_THRESHOLDS: TierThresholds = TierThresholds {
    low: 0.0,
    mid: 90.0,
    high: 200.0,
};

/// Thresholds for a project type, or `None` when the type has no tier table.
pub fn thresholds_for(project_type: ProjectType) -> Option<TierThresholds> {
    match project_type {
        ProjectType::BiomassGasification => Some(GASIFICATION_THRESHOLDS),
        ProjectType::BiogasElectricity | ProjectType::ModelS => Some(BIOGAS_THRESHOLDS),
        ProjectType::None => None,
    }
}

/// A half-open or closed interval on the `unit` column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitRange {
    pub lower: Bound<f64>,
    pub upper: Bound<f64>,
}

impl UnitRange {
    pub fn contains(&self, unit: f64) -> bool {
        let above = match self.lower {
            Bound::Included(lo) => unit >= lo,
            Bound::Excluded(lo) => unit > lo,
            Bound::Unbounded => true,
        };
        let below = match self.upper {
            Bound::Included(hi) => unit <= hi,
            Bound::Excluded(hi) => unit < hi,
            Bound::Unbounded => true,
        };
        above && below
    }
}

/// Range on `unit` for the given type and tier.
///
/// Returns `None` when the type has no threshold table.
pub fn unit_range(project_type: ProjectType, tier: UnitTier) -> Option<UnitRange> {
    let t = thresholds_for(project_type)?;
    let range = match tier {
        UnitTier::Small => UnitRange {
            lower: Bound::Included(t.low),
            upper: Bound::Excluded(t.mid),
        },
        UnitTier::Medium => UnitRange {
            lower: Bound::Included(t.mid),
            upper: Bound::Included(t.high),
        },
        UnitTier::Large => UnitRange {
            lower: Bound::Excluded(t.high),
            upper: Bound::Unbounded,
        },
    };
    Some(range)
}
