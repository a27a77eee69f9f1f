//! Repository for the `projects_desc` table.

use projects_core::types::DbId;
use projects_core::validation::require_non_blank;
use sqlx::{PgConnection, PgPool};

use crate::error::{store_err, StoreError};
use crate::models::description::{NewProjectDesc, ProjectDesc, UpsertProjectDesc};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, language, name, description, created_at, updated_at";

/// Provides data access for localized project descriptions.
pub struct ProjectDescRepo;

impl ProjectDescRepo {
    /// Insert the description for `(project_id, language)`, or overwrite it if
    /// one exists. The row keeps its id across overwrites.
    ///
    /// A missing project surfaces as a foreign-key `ConstraintViolation`.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertProjectDesc,
    ) -> Result<ProjectDesc, StoreError> {
        const OP: &str = "update project description";
        require_non_blank("language", &input.language)
            .map_err(|e| StoreError::from_core(OP, e))?;

        let query = format!(
            "INSERT INTO projects_desc (project_id, language, name, description) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (project_id, language) \
             DO UPDATE SET name = EXCLUDED.name, \
                           description = EXCLUDED.description, \
                           updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectDesc>(&query)
            .bind(input.project_id)
            .bind(&input.language)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
            .map_err(store_err(OP))
    }

    /// Plain insert used while creating a project. A repeated language fails
    /// with a unique violation, which aborts the surrounding transaction.
    pub(crate) async fn insert(
        conn: &mut PgConnection,
        project_id: DbId,
        input: &NewProjectDesc,
    ) -> Result<ProjectDesc, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects_desc (project_id, language, name, description) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectDesc>(&query)
            .bind(project_id)
            .bind(&input.language)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(conn)
            .await
    }

    /// The description of a project in one language, if present.
    pub async fn find_by_project_and_language(
        pool: &PgPool,
        project_id: DbId,
        language: &str,
    ) -> Result<Option<ProjectDesc>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects_desc WHERE project_id = $1 AND language = $2"
        );
        sqlx::query_as::<_, ProjectDesc>(&query)
            .bind(project_id)
            .bind(language)
            .fetch_optional(pool)
            .await
    }

    /// All descriptions of a project, ordered by language.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectDesc>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM projects_desc WHERE project_id = $1 ORDER BY language");
        sqlx::query_as::<_, ProjectDesc>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// All descriptions for a set of projects, for eager loading a page.
    pub async fn list_by_projects(
        pool: &PgPool,
        project_ids: &[DbId],
    ) -> Result<Vec<ProjectDesc>, sqlx::Error> {
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM projects_desc \
             WHERE project_id = ANY($1) \
             ORDER BY project_id, language"
        );
        sqlx::query_as::<_, ProjectDesc>(&query)
            .bind(project_ids)
            .fetch_all(pool)
            .await
    }
}
