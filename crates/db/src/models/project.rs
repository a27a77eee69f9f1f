//! Project entity model and DTOs.

use projects_core::country::Country;
use projects_core::project_type::ProjectType;
use projects_core::types::{DbId, Timestamp};
use projects_core::validation::Location;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::description::{NewProjectDesc, ProjectDesc};
use crate::models::specification::{ProjectSpecs, SpecMap};
use crate::models::status::{ProjectStatus, StatusId};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    /// Owner wallet address, lowercase `0x` hex.
    pub owner: String,
    pub owner_id: Option<String>,
    pub owner_address: Option<String>,
    pub status: ProjectStatus,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_name: Option<String>,
    pub area: Option<f64>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub project_type: i16,
    /// Capacity measure compared against the unit-tier ranges.
    pub unit: f64,
    pub country_id: Option<String>,
    pub thumbnail: Option<String>,
    pub iframe: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// Display name of the stored type id, `None` for ids outside the catalogue.
    pub fn type_name(&self) -> Option<&'static str> {
        ProjectType::from_id(self.project_type).map(ProjectType::display_name)
    }
}

/// A project together with its loaded associations and resolved country.
///
/// `country` is `None` when the project has no country id, the dataset has
/// no entry for the locale, or the lookup failed.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub type_name: Option<&'static str>,
    pub descs: Vec<ProjectDesc>,
    pub specs: Option<ProjectSpecs>,
    /// Gallery image paths. Only populated by single-project reads.
    pub images: Vec<String>,
    pub country: Option<Country>,
}

/// DTO for creating a new project. Status is always initialised to
/// `Registered`; images are added afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub owner: String,
    pub owner_id: Option<String>,
    pub owner_address: Option<String>,
    pub location: Option<Location>,
    pub location_name: Option<String>,
    pub area: Option<f64>,
    #[serde(rename = "type", default)]
    pub project_type: i16,
    #[serde(default)]
    pub unit: f64,
    pub country_id: Option<String>,
    pub iframe: Option<String>,
    #[serde(default)]
    pub descs: Vec<NewProjectDesc>,
    pub specs: Option<SpecMap>,
}

/// DTO for updating a project's core attributes.
///
/// Every listed column is overwritten, including with `None`. Descriptions,
/// specifications, images and status are never touched by an update.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub owner: String,
    pub owner_id: Option<String>,
    pub owner_address: Option<String>,
    pub location: Option<Location>,
    pub location_name: Option<String>,
    #[serde(rename = "type", default)]
    pub project_type: i16,
    #[serde(default)]
    pub unit: f64,
    pub country_id: Option<String>,
    pub iframe: Option<String>,
}

/// Listing filter.
///
/// A non-blank `search` selects the free-text variant and every structured
/// field is ignored for that call. Zero values of `status`, `project_type`
/// and `unit` mean "not set".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectListParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub status: Option<StatusId>,
    #[serde(default)]
    pub ids: Vec<DbId>,
    pub owner_id: Option<String>,
    pub country_id: Option<String>,
    #[serde(rename = "type")]
    pub project_type: Option<i16>,
    /// Unit tier selector (1, 2 or 3), applied together with `project_type`.
    pub unit: Option<i16>,
    pub location: Option<String>,
}
