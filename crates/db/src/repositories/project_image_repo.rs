//! Image operations: the project thumbnail and the `projects_image` gallery.
//!
//! Setting a thumbnail and appending a gallery image are separate
//! operations. Neither deletes or rewrites existing gallery rows.

use projects_core::types::DbId;
use projects_core::validation::require_non_blank;
use sqlx::PgPool;

use crate::error::{store_err, StoreError};
use crate::models::image::ProjectImage;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, image, created_at";

/// Provides data access for project images.
pub struct ProjectImageRepo;

impl ProjectImageRepo {
    /// Point the project's thumbnail at `path`. No gallery row is inserted.
    ///
    /// On failure the previous thumbnail is left in place.
    pub async fn set_thumbnail(
        pool: &PgPool,
        project_id: DbId,
        path: &str,
    ) -> Result<String, StoreError> {
        const OP: &str = "set thumbnail";
        require_non_blank("image path", path).map_err(|e| StoreError::from_core(OP, e))?;

        let result = sqlx::query(
            "UPDATE projects SET thumbnail = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(project_id)
        .bind(path)
        .execute(pool)
        .await
        .map_err(store_err(OP))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(OP, "Project", project_id));
        }
        Ok(path.to_string())
    }

    /// Append an image to the project's gallery.
    pub async fn add_gallery_image(
        pool: &PgPool,
        project_id: DbId,
        path: &str,
    ) -> Result<ProjectImage, StoreError> {
        const OP: &str = "add gallery image";
        require_non_blank("image path", path).map_err(|e| StoreError::from_core(OP, e))?;

        let query = format!(
            "INSERT INTO projects_image (project_id, image) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectImage>(&query)
            .bind(project_id)
            .bind(path)
            .fetch_one(pool)
            .await
            .map_err(store_err(OP))
    }

    /// Gallery image paths of a project, oldest first.
    pub async fn list_paths(pool: &PgPool, project_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT image FROM projects_image WHERE project_id = $1 ORDER BY created_at, id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }
}
