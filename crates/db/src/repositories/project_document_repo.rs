//! Repository for the `projects_document` table.
//!
//! Document ids are chosen by the caller. Batch upserts run as a single
//! statement, so a failing row aborts the whole batch.

use std::collections::HashSet;

use projects_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use projects_core::types::DbId;
use sqlx::PgPool;

use crate::error::{store_err, StoreError};
use crate::models::document::{DocumentListParams, ProjectDocument, UpsertDocument};
use crate::models::page::Page;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, project_id, name, url, document_type, created_at, updated_at, deleted_at";

/// Provides batch and listing operations for project documents.
pub struct ProjectDocumentRepo;

impl ProjectDocumentRepo {
    /// Insert new ids and update existing ones in one statement.
    ///
    /// For ids already present only `url`, `document_type` and `updated_at`
    /// are overwritten. An id repeated within the batch is rejected up front.
    pub async fn upsert_batch(
        pool: &PgPool,
        documents: &[UpsertDocument],
    ) -> Result<Vec<ProjectDocument>, StoreError> {
        const OP: &str = "upsert documents";
        if documents.is_empty() {
            return Ok(vec![]);
        }

        let mut seen = HashSet::with_capacity(documents.len());
        if let Some(dup) = documents.iter().find(|d| !seen.insert(d.id)) {
            return Err(StoreError::Validation {
                op: OP,
                message: format!("document id {} appears more than once in the batch", dup.id),
            });
        }

        let ids: Vec<DbId> = documents.iter().map(|d| d.id).collect();
        let project_ids: Vec<DbId> = documents.iter().map(|d| d.project_id).collect();
        let names: Vec<String> = documents.iter().map(|d| d.name.clone()).collect();
        let urls: Vec<String> = documents.iter().map(|d| d.url.clone()).collect();
        let types: Vec<String> = documents.iter().map(|d| d.document_type.clone()).collect();

        let query = format!(
            "INSERT INTO projects_document (id, project_id, name, url, document_type) \
             SELECT * FROM UNNEST($1::bigint[], $2::bigint[], $3::text[], $4::text[], $5::text[]) \
             ON CONFLICT (id) \
             DO UPDATE SET url = EXCLUDED.url, \
                           document_type = EXCLUDED.document_type, \
                           updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectDocument>(&query)
            .bind(&ids)
            .bind(&project_ids)
            .bind(&names)
            .bind(&urls)
            .bind(&types)
            .fetch_all(pool)
            .await
            .map_err(store_err(OP))
    }

    /// Permanently delete every document whose id is in `ids`.
    ///
    /// Returns the number of rows removed.
    pub async fn delete(pool: &PgPool, ids: &[DbId]) -> Result<u64, StoreError> {
        const OP: &str = "delete documents";
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("DELETE FROM projects_document WHERE id = ANY($1)")
            .bind(ids)
            .execute(pool)
            .await
            .map_err(store_err(OP))?;
        Ok(result.rows_affected())
    }

    /// Set the soft-delete marker on documents that do not carry it yet.
    ///
    /// Returns the number of rows marked.
    pub async fn soft_delete(pool: &PgPool, ids: &[DbId]) -> Result<u64, StoreError> {
        const OP: &str = "soft delete documents";
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            "UPDATE projects_document SET deleted_at = NOW() \
             WHERE id = ANY($1) AND deleted_at IS NULL",
        )
        .bind(ids)
        .execute(pool)
        .await
        .map_err(store_err(OP))?;
        Ok(result.rows_affected())
    }

    /// Find a document by id, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectDocument>, StoreError> {
        const OP: &str = "get document";
        let query = format!("SELECT {COLUMNS} FROM projects_document WHERE id = $1");
        sqlx::query_as::<_, ProjectDocument>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(store_err(OP))
    }

    /// Page through documents that are not soft-deleted, newest first.
    ///
    /// `total` counts every matching row before skip/limit are applied.
    pub async fn list(
        pool: &PgPool,
        params: &DocumentListParams,
    ) -> Result<Page<ProjectDocument>, StoreError> {
        const OP: &str = "list documents";
        let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset = clamp_offset(params.skip);

        let mut conditions = vec!["deleted_at IS NULL".to_string()];
        let mut param_idx: usize = 1;
        if !params.ids.is_empty() {
            conditions.push(format!("id = ANY(${param_idx})"));
            param_idx += 1;
        }
        if params.project_id.is_some() {
            conditions.push(format!("project_id = ${param_idx}"));
            param_idx += 1;
        }
        let where_clause = format!("WHERE {}", conditions.join(" AND "));

        let count_query = format!("SELECT COUNT(*) FROM projects_document {where_clause}");
        let mut count_q = sqlx::query_scalar::<_, i64>(&count_query);
        if !params.ids.is_empty() {
            count_q = count_q.bind(&params.ids);
        }
        if let Some(project_id) = params.project_id {
            count_q = count_q.bind(project_id);
        }
        let total = count_q.fetch_one(pool).await.map_err(store_err(OP))?;

        let query = format!(
            "SELECT {COLUMNS} FROM projects_document {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );
        let mut q = sqlx::query_as::<_, ProjectDocument>(&query);
        if !params.ids.is_empty() {
            q = q.bind(&params.ids);
        }
        if let Some(project_id) = params.project_id {
            q = q.bind(project_id);
        }
        let items = q
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
            .map_err(store_err(OP))?;

        Ok(Page { total, items })
    }
}
