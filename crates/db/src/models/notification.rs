//! Notification log model.

use fixtrack_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the append-only `notification_log` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationRecord {
    pub id: DbId,
    pub fixture_id: DbId,
    pub issue_type: String,
    pub status: String,
    pub recipient: String,
    pub created_at: Timestamp,
}
