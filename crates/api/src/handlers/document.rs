//! Handlers for the `/documents` resource.

use axum::extract::{Query, State};
use axum::Json;
use projects_db::models::document::{ProjectDocument, UpsertDocument};
use projects_db::models::page::Page;
use projects_db::repositories::ProjectDocumentRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::query::{parse_id_list, DocumentListQuery, IdsParams};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: u64,
}

/// PUT /api/v1/documents
pub async fn upsert(
    State(state): State<AppState>,
    Json(documents): Json<Vec<UpsertDocument>>,
) -> AppResult<Json<DataResponse<Vec<ProjectDocument>>>> {
    let rows = ProjectDocumentRepo::upsert_batch(&state.pool, &documents).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/documents
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<DocumentListQuery>,
) -> AppResult<Json<DataResponse<Page<ProjectDocument>>>> {
    let params = query.into_params()?;
    let page = ProjectDocumentRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: page }))
}

/// DELETE /api/v1/documents?ids=1,2
pub async fn delete(
    State(state): State<AppState>,
    Query(params): Query<IdsParams>,
) -> AppResult<Json<DataResponse<DeletedResponse>>> {
    let ids = parse_id_list(params.ids.as_deref())?;
    if ids.is_empty() {
        return Err(AppError::BadRequest("ids must name at least one document".into()));
    }
    let deleted = ProjectDocumentRepo::delete(&state.pool, &ids).await?;
    tracing::info!(deleted, "Documents deleted");
    Ok(Json(DataResponse {
        data: DeletedResponse { deleted },
    }))
}
