//! Collaborator seams of the threshold monitor.
//!
//! The engine is written against these traits so the policy logic can be
//! exercised with in-memory fakes. Production wiring lives in
//! [`crate::store`] (Postgres) and [`crate::email`] (SMTP).

use async_trait::async_trait;
use fixtrack_core::fixture::FixtureKey;
use fixtrack_core::issue::{IssueType, NotificationStatus};
use fixtrack_core::types::{DbId, Timestamp};
use fixtrack_db::models::fixture::FixtureCandidate;
use serde::Serialize;

/// Error type for collaborator calls. Candidate-query failures abort the
/// run; every other lookup degrades per candidate.
pub type SeamError = Box<dyn std::error::Error + Send + Sync>;

/// Read access to fixtures that owe a notification.
///
/// The implementation owns the reset-epoch join: a returned candidate has
/// already passed the threshold comparison and the "no SENT record newer
/// than both the last reset and `cooldown_cutoff`" idempotency check.
#[async_trait]
pub trait FixtureSource: Send + Sync {
    async fn warning_candidates(
        &self,
        cooldown_cutoff: Timestamp,
    ) -> Result<Vec<FixtureCandidate>, SeamError>;

    async fn limit_candidates(
        &self,
        cooldown_cutoff: Timestamp,
    ) -> Result<Vec<FixtureCandidate>, SeamError>;
}

/// Append-only record of dispatch attempts.
#[async_trait]
pub trait NotificationLog: Send + Sync {
    async fn append(
        &self,
        fixture_id: DbId,
        issue: IssueType,
        status: NotificationStatus,
        recipient: &str,
    ) -> Result<(), SeamError>;
}

/// Resolves CC groups and owner display names.
#[async_trait]
pub trait RecipientDirectory: Send + Sync {
    async fn emails_for_plant_role(
        &self,
        plant: &str,
        role: &str,
    ) -> Result<Vec<String>, SeamError>;

    async fn owner_display_name(&self, email: &str) -> Result<Option<String>, SeamError>;
}

/// Resolves the probe inventory attached to a fixture.
#[async_trait]
pub trait ProbeInventory: Send + Sync {
    async fn probes_for_fixture(&self, fixture_id: DbId) -> Result<Vec<ProbeLine>, SeamError>;
}

/// One probe inventory line as rendered into a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeLine {
    pub part_number: String,
    pub qty: i32,
}

/// Tag identifying the monitor as the source of outgoing messages.
pub const TRIGGERED_BY: &str = "threshold-monitor";

/// Everything a notifier needs to address and render one threshold message.
#[derive(Debug, Clone)]
pub struct ThresholdMessage {
    pub to: String,
    pub cc: Vec<String>,
    pub fixture: FixtureKey,
    pub project_name: String,
    /// Owner display name for the greeting; `None` falls back to a generic
    /// salutation.
    pub owner_name: Option<String>,
    pub contacts: i64,
    /// The crossed threshold: `warning_at` or `contacts_limit` depending on
    /// the pass.
    pub threshold: i64,
    pub probes: Vec<ProbeLine>,
    pub triggered_by: &'static str,
}

/// Delivers one threshold notification.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, issue: IssueType, message: &ThresholdMessage) -> Result<(), SeamError>;
}
