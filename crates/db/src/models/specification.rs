//! Technical specification blob (`projects_specs`).

use std::collections::BTreeMap;

use projects_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// Specification name to numeric value, stored as JSONB.
pub type SpecMap = BTreeMap<String, f64>;

/// A row from `projects_specs`. At most one per project.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectSpecs {
    pub id: DbId,
    pub project_id: DbId,
    pub specs: Json<SpecMap>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
