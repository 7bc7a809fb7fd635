//! Postgres-backed implementations of the monitor's read/log seams.

use async_trait::async_trait;
use fixtrack_core::issue::{IssueType, NotificationStatus};
use fixtrack_core::types::{DbId, Timestamp};
use fixtrack_db::models::fixture::FixtureCandidate;
use fixtrack_db::repositories::{FixtureRepo, NotificationLogRepo, ProbeRepo, UserRepo};
use fixtrack_db::DbPool;

use crate::seams::{
    FixtureSource, NotificationLog, ProbeInventory, ProbeLine, RecipientDirectory, SeamError,
};

/// Implements every database-facing seam over the shared connection pool.
///
/// Cheaply cloneable; the monitor takes one clone per seam.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FixtureSource for PgStore {
    async fn warning_candidates(
        &self,
        cooldown_cutoff: Timestamp,
    ) -> Result<Vec<FixtureCandidate>, SeamError> {
        Ok(FixtureRepo::warning_candidates(&self.pool, cooldown_cutoff).await?)
    }

    async fn limit_candidates(
        &self,
        cooldown_cutoff: Timestamp,
    ) -> Result<Vec<FixtureCandidate>, SeamError> {
        Ok(FixtureRepo::limit_candidates(&self.pool, cooldown_cutoff).await?)
    }
}

#[async_trait]
impl NotificationLog for PgStore {
    async fn append(
        &self,
        fixture_id: DbId,
        issue: IssueType,
        status: NotificationStatus,
        recipient: &str,
    ) -> Result<(), SeamError> {
        NotificationLogRepo::append(&self.pool, fixture_id, issue, status, recipient).await?;
        Ok(())
    }
}

#[async_trait]
impl RecipientDirectory for PgStore {
    async fn emails_for_plant_role(
        &self,
        plant: &str,
        role: &str,
    ) -> Result<Vec<String>, SeamError> {
        Ok(UserRepo::emails_for_plant_role(&self.pool, plant, role).await?)
    }

    async fn owner_display_name(&self, email: &str) -> Result<Option<String>, SeamError> {
        Ok(UserRepo::display_name_by_email(&self.pool, email).await?)
    }
}

#[async_trait]
impl ProbeInventory for PgStore {
    async fn probes_for_fixture(&self, fixture_id: DbId) -> Result<Vec<ProbeLine>, SeamError> {
        let probes = ProbeRepo::list_for_fixture(&self.pool, fixture_id).await?;
        Ok(probes
            .into_iter()
            .map(|p| ProbeLine {
                part_number: p.part_number,
                qty: p.qty,
            })
            .collect())
    }
}
