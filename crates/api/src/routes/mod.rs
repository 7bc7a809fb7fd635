pub mod fixture;
pub mod health;
pub mod monitor;
pub mod plant;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /monitor/run                             trigger a monitor run (shared secret)
///
/// /plants                                  list, create
/// /plants/{id}                             get, update, delete
///
/// /users                                   list (?plant_id=&role=), create
/// /users/{id}                              get, update, deactivate
///
/// /fixtures                                list (?plant_id=), create
/// /fixtures/{id}                           get, update, delete
/// /fixtures/{id}/contacts                  record usage (POST)
/// /fixtures/{id}/reset                     reset counter (POST)
/// /fixtures/{id}/notifications             recent notification log (GET)
/// /fixtures/{fixture_id}/probes            list, create
/// /fixtures/{fixture_id}/probes/{id}       update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/monitor", monitor::router())
        .nest("/plants", plant::router())
        .nest("/users", user::router())
        .nest("/fixtures", fixture::router())
}
