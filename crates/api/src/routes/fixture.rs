//! Route definitions for the `/fixtures` resource.
//!
//! Also nests probe inventory routes under `/fixtures/{fixture_id}/probes`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{fixture, probe};
use crate::state::AppState;

/// Routes mounted at `/fixtures`.
///
/// ```text
/// GET    /                              -> list (?plant_id=)
/// POST   /                              -> create
/// GET    /{id}                          -> get_by_id
/// PUT    /{id}                          -> update
/// DELETE /{id}                          -> delete
/// POST   /{id}/contacts                 -> record_contacts
/// POST   /{id}/reset                    -> reset_contacts
/// GET    /{id}/notifications            -> list_notifications
///
/// GET    /{fixture_id}/probes           -> list_for_fixture
/// POST   /{fixture_id}/probes           -> create
/// PUT    /{fixture_id}/probes/{id}      -> update
/// DELETE /{fixture_id}/probes/{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    let probe_routes = Router::new()
        .route("/", get(probe::list_for_fixture).post(probe::create))
        .route("/{id}", put(probe::update).delete(probe::delete));

    Router::new()
        .route("/", get(fixture::list).post(fixture::create))
        .route(
            "/{id}",
            get(fixture::get_by_id)
                .put(fixture::update)
                .delete(fixture::delete),
        )
        .route("/{id}/contacts", post(fixture::record_contacts))
        .route("/{id}/reset", post(fixture::reset_contacts))
        .route("/{id}/notifications", get(fixture::list_notifications))
        .nest("/{fixture_id}/probes", probe_routes)
}
