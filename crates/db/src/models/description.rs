//! Localized project descriptions (`projects_desc`).

use projects_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `projects_desc`. Unique on `(project_id, language)`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectDesc {
    pub id: DbId,
    pub project_id: DbId,
    pub language: String,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A description supplied as part of a project create request.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProjectDesc {
    pub language: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Insert-or-overwrite the description for one language of a project.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertProjectDesc {
    pub project_id: DbId,
    pub language: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}
