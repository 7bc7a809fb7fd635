//! Repository for the `plants` table.

use fixtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::plant::{CreatePlant, Plant, UpdatePlant};

/// Column list for `plants` queries.
const COLUMNS: &str = "id, name, created_at";

/// Provides CRUD operations for plants.
pub struct PlantRepo;

impl PlantRepo {
    /// Create a plant.
    pub async fn create(pool: &PgPool, input: &CreatePlant) -> Result<Plant, sqlx::Error> {
        let query = format!("INSERT INTO plants (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Plant>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// List all plants ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Plant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM plants ORDER BY name");
        sqlx::query_as::<_, Plant>(&query).fetch_all(pool).await
    }

    /// Find a plant by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Plant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM plants WHERE id = $1");
        sqlx::query_as::<_, Plant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Rename a plant. Returns `None` if the plant does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePlant,
    ) -> Result<Option<Plant>, sqlx::Error> {
        let query = format!(
            "UPDATE plants SET name = COALESCE($2, name) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Plant>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a plant and, via cascade, its users and fixtures.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM plants WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
