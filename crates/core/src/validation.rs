//! Input checks applied before a write reaches the database.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

const ETH_ADDRESS_PATTERN: &str = r"^0x[0-9a-fA-F]{40}$";

static ETH_ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ETH_ADDRESS_PATTERN).expect("valid regex"));

/// Validate an owner wallet address and return its canonical lowercase form.
///
/// The address must be `0x` followed by 40 hex digits. Mixed-case input is
/// accepted and lowercased so lookups by owner compare consistently.
pub fn normalize_owner_address(address: &str) -> Result<String, CoreError> {
    let trimmed = address.trim();
    if !ETH_ADDRESS_RE.is_match(trimmed) {
        return Err(CoreError::Validation(format!(
            "malformed owner address: {address:?}"
        )));
    }
    Ok(trimmed.to_ascii_lowercase())
}

/// WGS84 point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(CoreError::Validation(format!(
                "latitude {} out of range [-90, 90]",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(CoreError::Validation(format!(
                "longitude {} out of range [-180, 180]",
                self.longitude
            )));
        }
        Ok(())
    }
}

/// Reject blank strings for fields that form part of a natural key.
pub fn require_non_blank(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Specification values are stored as JSON numbers, which cannot carry NaN or infinity.
pub fn require_finite_specs<'a>(
    specs: impl IntoIterator<Item = (&'a String, &'a f64)>,
) -> Result<(), CoreError> {
    for (name, value) in specs {
        if !value.is_finite() {
            return Err(CoreError::Validation(format!(
                "specification {name:?} must be a finite number"
            )));
        }
    }
    Ok(())
}
