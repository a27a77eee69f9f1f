//! Route definitions for the `/documents` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::document;
use crate::state::AppState;

/// Routes mounted at `/documents`.
///
/// ```text
/// GET    /            -> list
/// PUT    /            -> upsert (batch)
/// DELETE /?ids=1,2    -> delete (hard)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(document::list)
            .put(document::upsert)
            .delete(document::delete),
    )
}
