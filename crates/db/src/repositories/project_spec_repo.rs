//! Repository for the `projects_specs` table.

use projects_core::types::DbId;
use projects_core::validation::require_finite_specs;
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};

use crate::error::{store_err, StoreError};
use crate::models::specification::{ProjectSpecs, SpecMap};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, specs, created_at, updated_at";

/// Provides data access for the per-project specification blob.
pub struct ProjectSpecRepo;

impl ProjectSpecRepo {
    /// Insert the specification for a project, or replace the spec map of the
    /// existing row. Only `specs` and `updated_at` change on conflict.
    pub async fn upsert(
        pool: &PgPool,
        project_id: DbId,
        specs: &SpecMap,
    ) -> Result<ProjectSpecs, StoreError> {
        const OP: &str = "update project specs";
        require_finite_specs(specs).map_err(|e| StoreError::from_core(OP, e))?;

        let query = format!(
            "INSERT INTO projects_specs (project_id, specs) \
             VALUES ($1, $2) \
             ON CONFLICT (project_id) \
             DO UPDATE SET specs = EXCLUDED.specs, updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectSpecs>(&query)
            .bind(project_id)
            .bind(Json(specs))
            .fetch_one(pool)
            .await
            .map_err(store_err(OP))
    }

    /// Plain insert used while creating a project.
    pub(crate) async fn insert(
        conn: &mut PgConnection,
        project_id: DbId,
        specs: &SpecMap,
    ) -> Result<ProjectSpecs, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects_specs (project_id, specs) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectSpecs>(&query)
            .bind(project_id)
            .bind(Json(specs))
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<ProjectSpecs>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects_specs WHERE project_id = $1");
        sqlx::query_as::<_, ProjectSpecs>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Specifications for a set of projects, for eager loading a page.
    pub async fn list_by_projects(
        pool: &PgPool,
        project_ids: &[DbId],
    ) -> Result<Vec<ProjectSpecs>, sqlx::Error> {
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM projects_specs WHERE project_id = ANY($1)");
        sqlx::query_as::<_, ProjectSpecs>(&query)
            .bind(project_ids)
            .fetch_all(pool)
            .await
    }
}
