use projects_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A gallery image row from `projects_image`. Rows are only ever appended.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectImage {
    pub id: DbId,
    pub project_id: DbId,
    /// Storage path of the uploaded image.
    pub image: String,
    pub created_at: Timestamp,
}
