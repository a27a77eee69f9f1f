//! Query-string types for the list and delete endpoints.
//!
//! Id sets travel as a comma-separated list (`?ids=1,2,3`).

use projects_core::types::DbId;
use projects_db::models::document::DocumentListParams;
use projects_db::models::project::ProjectListParams;
use serde::Deserialize;

use crate::error::AppError;

/// `GET /projects` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub status: Option<i16>,
    pub ids: Option<String>,
    pub owner_id: Option<String>,
    pub country_id: Option<String>,
    #[serde(rename = "type")]
    pub project_type: Option<i16>,
    pub unit: Option<i16>,
    pub location: Option<String>,
}

impl ProjectListQuery {
    pub fn into_params(self) -> Result<ProjectListParams, AppError> {
        Ok(ProjectListParams {
            skip: self.skip,
            limit: self.limit,
            search: self.search,
            status: self.status,
            ids: parse_id_list(self.ids.as_deref())?,
            owner_id: self.owner_id,
            country_id: self.country_id,
            project_type: self.project_type,
            unit: self.unit,
            location: self.location,
        })
    }
}

/// `GET /projects/{id}` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct LangParams {
    pub lang: Option<String>,
}

/// `GET /documents` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct DocumentListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub ids: Option<String>,
    pub project_id: Option<DbId>,
}

impl DocumentListQuery {
    pub fn into_params(self) -> Result<DocumentListParams, AppError> {
        Ok(DocumentListParams {
            skip: self.skip,
            limit: self.limit,
            ids: parse_id_list(self.ids.as_deref())?,
            project_id: self.project_id,
        })
    }
}

/// `DELETE /documents` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct IdsParams {
    pub ids: Option<String>,
}

/// Parse `"1, 2,3"` into ids. Empty segments are skipped.
pub fn parse_id_list(raw: Option<&str>) -> Result<Vec<DbId>, AppError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<DbId>()
                .map_err(|_| AppError::BadRequest(format!("invalid id {s:?} in ids")))
        })
        .collect()
}
