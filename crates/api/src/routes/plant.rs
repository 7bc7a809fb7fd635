//! Route definitions for the `/plants` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::plant;
use crate::state::AppState;

/// Routes mounted at `/plants`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(plant::list).post(plant::create))
        .route(
            "/{id}",
            get(plant::get_by_id).put(plant::update).delete(plant::delete),
        )
}
