//! Route definitions for the monitor trigger.

use axum::routing::get;
use axum::Router;

use crate::handlers::monitor;
use crate::state::AppState;

/// Routes mounted at `/monitor`.
///
/// ```text
/// GET /run?key=<secret>    -> trigger_run
/// ```
///
/// GET rather than POST so a bare cron `curl`/`wget` line can drive it,
/// matching the external-scheduler deployment model.
pub fn router() -> Router<AppState> {
    Router::new().route("/run", get(monitor::trigger_run))
}
