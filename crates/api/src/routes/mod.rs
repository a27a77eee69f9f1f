pub mod document;
pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /projects                      list, create
/// /projects/{id}                 get, update
/// /projects/{id}/descriptions    upsert description (PUT)
/// /projects/{id}/specs           upsert specs (PUT)
/// /projects/{id}/status          change status (PUT)
/// /projects/{id}/owner           owner address (GET)
/// /projects/{id}/thumbnail       set thumbnail (PUT)
/// /projects/{id}/images          add gallery image (POST)
///
/// /documents                     list, batch upsert (PUT), delete (?ids=)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/documents", document::router())
}
