//! Route definitions for the `/projects` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                     -> list
/// POST   /                     -> create
/// GET    /{id}                 -> get_by_id
/// PUT    /{id}                 -> update
/// PUT    /{id}/descriptions    -> update_description
/// PUT    /{id}/specs           -> update_specs
/// PUT    /{id}/status          -> change_status
/// GET    /{id}/owner           -> get_owner
/// PUT    /{id}/thumbnail       -> set_thumbnail
/// POST   /{id}/images          -> add_gallery_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/{id}", get(project::get_by_id).put(project::update))
        .route("/{id}/descriptions", put(project::update_description))
        .route("/{id}/specs", put(project::update_specs))
        .route("/{id}/status", put(project::change_status))
        .route("/{id}/owner", get(project::get_owner))
        .route("/{id}/thumbnail", put(project::set_thumbnail))
        .route("/{id}/images", post(project::add_gallery_image))
}
