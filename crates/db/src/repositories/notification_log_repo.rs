//! Repository for the append-only `notification_log` table.

use fixtrack_core::issue::{IssueType, NotificationStatus};
use fixtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::NotificationRecord;

/// Column list for `notification_log` queries.
const COLUMNS: &str = "id, fixture_id, issue_type, status, recipient, created_at";

/// Provides append and read operations for the notification log.
///
/// Rows are never updated or deleted; the log is the monitor's sole
/// idempotency record.
pub struct NotificationLogRepo;

impl NotificationLogRepo {
    /// Append one dispatch attempt, returning the generated id.
    pub async fn append(
        pool: &PgPool,
        fixture_id: DbId,
        issue_type: IssueType,
        status: NotificationStatus,
        recipient: &str,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO notification_log (fixture_id, issue_type, status, recipient) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(fixture_id)
        .bind(issue_type.as_str())
        .bind(status.as_str())
        .bind(recipient)
        .fetch_one(pool)
        .await
    }

    /// Most recent log rows for a fixture, newest first.
    pub async fn list_for_fixture(
        pool: &PgPool,
        fixture_id: DbId,
        limit: i64,
    ) -> Result<Vec<NotificationRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notification_log \
             WHERE fixture_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, NotificationRecord>(&query)
            .bind(fixture_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
