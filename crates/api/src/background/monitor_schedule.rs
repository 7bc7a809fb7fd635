//! Optional in-process monitor schedule.
//!
//! When `MONITOR_INTERVAL_SECS > 0`, the binary spawns this loop instead
//! of relying solely on an external scheduler. Each tick goes through the
//! same run gate as the HTTP trigger, so the at-most-one-run invariant
//! holds whichever path fires; a tick that loses the race is skipped, not
//! queued. Runs until `cancel` is triggered.

use std::time::Duration;

use fixtrack_notify::EmailConfig;
use tokio_util::sync::CancellationToken;

use crate::handlers::monitor::execute_run;
use crate::state::AppState;

/// Run the scheduled monitor loop.
pub async fn run(state: AppState, email: EmailConfig, cancel: CancellationToken) {
    let interval_secs = state.config.monitor.interval_secs;

    tracing::info!(interval_secs, "Monitor schedule started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    // The first tick fires immediately; skip it so startup does not race
    // an external trigger that may already be configured.
    interval.tick().await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Monitor schedule stopping");
                break;
            }
            _ = interval.tick() => {
                let Ok(_guard) = state.run_gate.try_lock() else {
                    tracing::debug!("Monitor run already in progress, skipping tick");
                    continue;
                };
                match execute_run(&state, email.clone()).await {
                    Ok(summary) => {
                        tracing::info!(
                            run_id = %summary.run_id,
                            emails_sent = summary.emails_sent,
                            "Scheduled monitor run complete"
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Scheduled monitor run failed");
                    }
                }
            }
        }
    }
}
