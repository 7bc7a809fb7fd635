//! Handler for the monitor trigger endpoint.
//!
//! An external scheduler (cron hitting `GET /monitor/run?key=...`) drives
//! the threshold monitor. The shared-secret check happens before any other
//! work; the run gate then guarantees at most one concurrent run, which is
//! a hard invariant -- the notification log is the sole idempotency guard,
//! so concurrent runs could double-send.

use axum::extract::{Query, State};
use axum::Json;
use fixtrack_core::error::CoreError;
use fixtrack_notify::{
    EmailConfig, MonitorConfig, PgStore, RunSummary, SmtpNotifier, ThresholdMonitor,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Query parameters of the trigger endpoint.
#[derive(Debug, Deserialize)]
pub struct TriggerParams {
    pub key: Option<String>,
}

/// GET /api/v1/monitor/run?key=<secret>
pub async fn trigger_run(
    State(state): State<AppState>,
    Query(params): Query<TriggerParams>,
) -> AppResult<Json<RunSummary>> {
    if params.key.as_deref() != Some(state.config.monitor.secret.as_str()) {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid or missing monitor key".into(),
        )));
    }

    let Some(email) = state.email.clone() else {
        return Err(AppError::ServiceUnavailable(
            "SMTP delivery is not configured (SMTP_HOST unset)".into(),
        ));
    };

    let _guard = state.run_gate.try_lock().map_err(|_| {
        AppError::Core(CoreError::Conflict("A monitor run is already in progress".into()))
    })?;

    let summary = execute_run(&state, email)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    Ok(Json(summary))
}

/// Build the production monitor wiring and execute one run.
///
/// The caller must hold the run gate for the duration of this call.
pub(crate) async fn execute_run(
    state: &AppState,
    email: EmailConfig,
) -> Result<RunSummary, fixtrack_notify::MonitorError> {
    let store = PgStore::new(state.pool.clone());
    let monitor = ThresholdMonitor::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store,
        SmtpNotifier::new(email),
        MonitorConfig {
            window_hours: state.config.monitor.window_hours,
            max_emails_per_run: state.config.monitor.max_emails_per_run,
        },
    );
    monitor.run().await
}
