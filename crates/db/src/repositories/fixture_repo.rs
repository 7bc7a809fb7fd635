//! Repository for the `fixtures` table.
//!
//! Besides CRUD and counter maintenance, this repository owns the two
//! monitor candidate queries. The reset-epoch join lives here so the
//! monitor itself never re-derives reset timestamps: a candidate is
//! returned iff no SENT notification of the relevant issue types exists
//! that is both newer than the fixture's last reset and newer than the
//! caller-supplied cooldown cutoff.

use fixtrack_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::fixture::{CreateFixture, Fixture, FixtureCandidate, UpdateFixture};

/// Column list for `fixtures` queries.
const COLUMNS: &str = "\
    id, plant_id, adapter_code, fixture_type, project_name, owner_email, \
    contacts, warning_at, contacts_limit, created_at, updated_at";

/// Candidate projection columns (joined against `plants` for the name).
const CANDIDATE_COLUMNS: &str = "\
    f.id, p.name AS plant, f.adapter_code, f.fixture_type, f.project_name, \
    f.owner_email, f.contacts, f.warning_at, f.contacts_limit";

/// Provides CRUD, counter, and candidate-selection operations for fixtures.
pub struct FixtureRepo;

impl FixtureRepo {
    /// Register a fixture. The contact counter starts at zero.
    pub async fn create(pool: &PgPool, input: &CreateFixture) -> Result<Fixture, sqlx::Error> {
        let query = format!(
            "INSERT INTO fixtures \
                (plant_id, adapter_code, fixture_type, project_name, owner_email, \
                 warning_at, contacts_limit) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fixture>(&query)
            .bind(input.plant_id)
            .bind(&input.adapter_code)
            .bind(&input.fixture_type)
            .bind(&input.project_name)
            .bind(&input.owner_email)
            .bind(input.warning_at)
            .bind(input.contacts_limit)
            .fetch_one(pool)
            .await
    }

    /// List fixtures, optionally restricted to one plant.
    pub async fn list(pool: &PgPool, plant_id: Option<DbId>) -> Result<Vec<Fixture>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM fixtures \
             WHERE ($1::BIGINT IS NULL OR plant_id = $1) \
             ORDER BY plant_id, adapter_code, fixture_type"
        );
        sqlx::query_as::<_, Fixture>(&query)
            .bind(plant_id)
            .fetch_all(pool)
            .await
    }

    /// Find a fixture by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Fixture>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fixtures WHERE id = $1");
        sqlx::query_as::<_, Fixture>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update fixture metadata and thresholds. Returns `None` if the fixture
    /// does not exist. Omitted fields keep their current value.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFixture,
    ) -> Result<Option<Fixture>, sqlx::Error> {
        let query = format!(
            "UPDATE fixtures SET \
                project_name = COALESCE($2, project_name), \
                owner_email = COALESCE($3, owner_email), \
                warning_at = COALESCE($4, warning_at), \
                contacts_limit = COALESCE($5, contacts_limit), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fixture>(&query)
            .bind(id)
            .bind(&input.project_name)
            .bind(&input.owner_email)
            .bind(input.warning_at)
            .bind(input.contacts_limit)
            .fetch_optional(pool)
            .await
    }

    /// Delete a fixture and, via cascade, its probes, resets, and log rows.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM fixtures WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Add `count` contacts to the fixture's usage counter.
    ///
    /// Returns the updated fixture, or `None` if it does not exist.
    pub async fn add_contacts(
        pool: &PgPool,
        id: DbId,
        count: i64,
    ) -> Result<Option<Fixture>, sqlx::Error> {
        let query = format!(
            "UPDATE fixtures SET contacts = contacts + $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fixture>(&query)
            .bind(id)
            .bind(count)
            .fetch_optional(pool)
            .await
    }

    /// Reset the fixture's counter to zero, recording a `fixture_resets` row
    /// with the previous count in the same statement.
    ///
    /// The reset row is the new notification epoch boundary. Returns the
    /// updated fixture, or `None` if it does not exist.
    pub async fn reset_contacts(
        pool: &PgPool,
        id: DbId,
        reset_by: Option<&str>,
    ) -> Result<Option<Fixture>, sqlx::Error> {
        let query = "\
            WITH target AS ( \
                SELECT id, contacts FROM fixtures WHERE id = $1 FOR UPDATE \
            ), logged AS ( \
                INSERT INTO fixture_resets (fixture_id, previous_contacts, reset_by) \
                SELECT id, contacts, $2 FROM target \
            ) \
            UPDATE fixtures f SET contacts = 0, updated_at = NOW() \
            FROM target WHERE f.id = target.id \
            RETURNING f.id, f.plant_id, f.adapter_code, f.fixture_type, \
                f.project_name, f.owner_email, f.contacts, f.warning_at, \
                f.contacts_limit, f.created_at, f.updated_at";
        sqlx::query_as::<_, Fixture>(query)
            .bind(id)
            .bind(reset_by)
            .fetch_optional(pool)
            .await
    }

    /// Fixtures in the warning band that still owe a WARNING notification.
    ///
    /// SQL-side filters: `warning_at` set, `contacts >= warning_at`, and not
    /// already at/over `contacts_limit` (a fixture past its limit is a LIMIT
    /// candidate only). The NOT EXISTS clause suppresses fixtures with a
    /// SENT record of either issue type newer than both the last reset and
    /// `cooldown_cutoff` -- a LIMIT send therefore also silences WARNING for
    /// the rest of the epoch. Owner-email validity is checked by the caller.
    pub async fn warning_candidates(
        pool: &PgPool,
        cooldown_cutoff: Timestamp,
    ) -> Result<Vec<FixtureCandidate>, sqlx::Error> {
        let query = format!(
            "SELECT {CANDIDATE_COLUMNS} \
             FROM fixtures f \
             JOIN plants p ON p.id = f.plant_id \
             WHERE f.warning_at IS NOT NULL \
               AND f.contacts >= f.warning_at \
               AND (f.contacts_limit IS NULL OR f.contacts < f.contacts_limit) \
               AND NOT EXISTS ( \
                   SELECT 1 FROM notification_log n \
                   WHERE n.fixture_id = f.id \
                     AND n.status = 'sent' \
                     AND n.issue_type IN ('warning', 'limit') \
                     AND n.created_at >= $1 \
                     AND n.created_at > COALESCE( \
                         (SELECT MAX(r.created_at) FROM fixture_resets r \
                          WHERE r.fixture_id = f.id), \
                         'epoch'::TIMESTAMPTZ) \
               ) \
             ORDER BY p.name, f.adapter_code, f.fixture_type"
        );
        sqlx::query_as::<_, FixtureCandidate>(&query)
            .bind(cooldown_cutoff)
            .fetch_all(pool)
            .await
    }

    /// Fixtures at or over their limit that still owe a LIMIT notification.
    ///
    /// Unlike the warning query, only prior SENT LIMIT records suppress:
    /// LIMIT is one-shot per post-reset epoch and is not silenced by
    /// warning history.
    pub async fn limit_candidates(
        pool: &PgPool,
        cooldown_cutoff: Timestamp,
    ) -> Result<Vec<FixtureCandidate>, sqlx::Error> {
        let query = format!(
            "SELECT {CANDIDATE_COLUMNS} \
             FROM fixtures f \
             JOIN plants p ON p.id = f.plant_id \
             WHERE f.contacts_limit IS NOT NULL \
               AND f.contacts >= f.contacts_limit \
               AND NOT EXISTS ( \
                   SELECT 1 FROM notification_log n \
                   WHERE n.fixture_id = f.id \
                     AND n.status = 'sent' \
                     AND n.issue_type = 'limit' \
                     AND n.created_at >= $1 \
                     AND n.created_at > COALESCE( \
                         (SELECT MAX(r.created_at) FROM fixture_resets r \
                          WHERE r.fixture_id = f.id), \
                         'epoch'::TIMESTAMPTZ) \
               ) \
             ORDER BY p.name, f.adapter_code, f.fixture_type"
        );
        sqlx::query_as::<_, FixtureCandidate>(&query)
            .bind(cooldown_cutoff)
            .fetch_all(pool)
            .await
    }
}
