//! Supporting documents attached to a project (`projects_document`).

use projects_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `projects_document`. The id is supplied by the caller.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectDocument {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub url: String,
    pub document_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Soft-delete marker. Listing hides rows where this is set.
    pub deleted_at: Option<Timestamp>,
}

/// One element of a batch upsert. An existing `id` has its `url`,
/// `document_type` and `updated_at` overwritten; a new `id` is inserted.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertDocument {
    pub id: DbId,
    pub project_id: DbId,
    #[serde(default)]
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub document_type: String,
}

/// Filter for listing documents.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentListParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    /// Restrict to these ids when non-empty.
    #[serde(default)]
    pub ids: Vec<DbId>,
    pub project_id: Option<DbId>,
}
