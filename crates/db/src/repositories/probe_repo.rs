//! Repository for the `probes` table.

use fixtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::probe::{CreateProbe, Probe, UpdateProbe};

/// Column list for `probes` queries.
const COLUMNS: &str = "id, fixture_id, part_number, qty, created_at";

/// Provides CRUD operations for probe inventory lines.
pub struct ProbeRepo;

impl ProbeRepo {
    /// Add a probe line to a fixture.
    pub async fn create(
        pool: &PgPool,
        fixture_id: DbId,
        input: &CreateProbe,
    ) -> Result<Probe, sqlx::Error> {
        let query = format!(
            "INSERT INTO probes (fixture_id, part_number, qty) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Probe>(&query)
            .bind(fixture_id)
            .bind(&input.part_number)
            .bind(input.qty)
            .fetch_one(pool)
            .await
    }

    /// List all probe lines for a fixture.
    pub async fn list_for_fixture(
        pool: &PgPool,
        fixture_id: DbId,
    ) -> Result<Vec<Probe>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM probes WHERE fixture_id = $1 ORDER BY part_number"
        );
        sqlx::query_as::<_, Probe>(&query)
            .bind(fixture_id)
            .fetch_all(pool)
            .await
    }

    /// Update a probe line scoped to its fixture.
    ///
    /// Returns `None` if no probe with that id belongs to the fixture.
    pub async fn update(
        pool: &PgPool,
        fixture_id: DbId,
        id: DbId,
        input: &UpdateProbe,
    ) -> Result<Option<Probe>, sqlx::Error> {
        let query = format!(
            "UPDATE probes SET \
                part_number = COALESCE($3, part_number), \
                qty = COALESCE($4, qty) \
             WHERE id = $2 AND fixture_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Probe>(&query)
            .bind(fixture_id)
            .bind(id)
            .bind(&input.part_number)
            .bind(input.qty)
            .fetch_optional(pool)
            .await
    }

    /// Delete a probe line scoped to its fixture.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, fixture_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM probes WHERE id = $2 AND fixture_id = $1")
            .bind(fixture_id)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
