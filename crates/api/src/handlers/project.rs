//! Handlers for the `/projects` resource.
//!
//! Each handler maps one store operation onto HTTP without adding logic.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use projects_core::types::DbId;
use projects_db::models::description::{ProjectDesc, UpsertProjectDesc};
use projects_db::models::image::ProjectImage;
use projects_db::models::page::Page;
use projects_db::models::project::{CreateProject, ProjectDetail, UpdateProject};
use projects_db::models::specification::{ProjectSpecs, SpecMap};
use projects_db::models::status::ProjectStatus;
use projects_db::repositories::{ProjectDescRepo, ProjectImageRepo, ProjectRepo, ProjectSpecRepo};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::query::{LangParams, ProjectListQuery};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /projects/{id}/descriptions`.
#[derive(Debug, Deserialize)]
pub struct DescriptionBody {
    pub language: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Request body for `PUT /projects/{id}/specs`.
#[derive(Debug, Deserialize)]
pub struct SpecsBody {
    pub specs: SpecMap,
}

/// Request body for `PUT /projects/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: ProjectStatus,
}

/// Request body for the thumbnail and gallery endpoints.
#[derive(Debug, Deserialize)]
pub struct ImageBody {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct ProjectIdResponse {
    pub id: DbId,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub id: DbId,
    pub status: ProjectStatus,
}

#[derive(Debug, Serialize)]
pub struct OwnerResponse {
    pub owner: String,
}

#[derive(Debug, Serialize)]
pub struct ThumbnailResponse {
    pub thumbnail: String,
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectDetail>>)> {
    let project = ProjectRepo::create(&state.pool, &state.countries, &input).await?;
    tracing::info!(project_id = project.project.id, "Project created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProjectListQuery>,
) -> AppResult<Json<DataResponse<Page<ProjectDetail>>>> {
    let params = query.into_params()?;
    let page = ProjectRepo::list(&state.pool, &state.countries, &params).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<LangParams>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    let project =
        ProjectRepo::get_by_id(&state.pool, &state.countries, id, params.lang.as_deref()).await?;
    Ok(Json(DataResponse { data: project }))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<ProjectIdResponse>>> {
    let id = ProjectRepo::update(&state.pool, id, &input).await?;
    Ok(Json(DataResponse {
        data: ProjectIdResponse { id },
    }))
}

/// PUT /api/v1/projects/{id}/descriptions
pub async fn update_description(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<DescriptionBody>,
) -> AppResult<Json<DataResponse<ProjectDesc>>> {
    let input = UpsertProjectDesc {
        project_id: id,
        language: body.language,
        name: body.name,
        description: body.description,
    };
    let desc = ProjectDescRepo::upsert(&state.pool, &input).await?;
    Ok(Json(DataResponse { data: desc }))
}

/// PUT /api/v1/projects/{id}/specs
pub async fn update_specs(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<SpecsBody>,
) -> AppResult<Json<DataResponse<ProjectSpecs>>> {
    let specs = ProjectSpecRepo::upsert(&state.pool, id, &body.specs).await?;
    Ok(Json(DataResponse { data: specs }))
}

/// PUT /api/v1/projects/{id}/status
pub async fn change_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<StatusBody>,
) -> AppResult<Json<DataResponse<StatusResponse>>> {
    ProjectRepo::change_status(&state.pool, id, body.status).await?;
    Ok(Json(DataResponse {
        data: StatusResponse {
            id,
            status: body.status,
        },
    }))
}

/// GET /api/v1/projects/{id}/owner
pub async fn get_owner(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<OwnerResponse>>> {
    let owner = ProjectRepo::get_owner(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: OwnerResponse { owner },
    }))
}

/// PUT /api/v1/projects/{id}/thumbnail
pub async fn set_thumbnail(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<ImageBody>,
) -> AppResult<Json<DataResponse<ThumbnailResponse>>> {
    let thumbnail = ProjectImageRepo::set_thumbnail(&state.pool, id, &body.path).await?;
    Ok(Json(DataResponse {
        data: ThumbnailResponse { thumbnail },
    }))
}

/// POST /api/v1/projects/{id}/images
pub async fn add_gallery_image(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<ImageBody>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectImage>>)> {
    let image = ProjectImageRepo::add_gallery_image(&state.pool, id, &body.path).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: image })))
}
