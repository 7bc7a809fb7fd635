use std::sync::Arc;

use fixtrack_notify::EmailConfig;
use tokio::sync::Mutex;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: fixtrack_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// SMTP settings; `None` when `SMTP_HOST` is unset, which disables the
    /// monitor trigger with a 503.
    pub email: Option<EmailConfig>,
    /// Advisory lock guaranteeing at most one monitor run at a time.
    /// Acquired with `try_lock`; a trigger that loses the race is rejected
    /// with 409 instead of queueing behind the running pass.
    pub run_gate: Arc<Mutex<()>>,
}
