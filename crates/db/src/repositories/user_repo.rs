//! Repository for the `users` table.
//!
//! Also serves as the recipient directory for the threshold monitor:
//! [`UserRepo::emails_for_plant_role`] and [`UserRepo::display_name_by_email`]
//! back the CC-group and greeting lookups.

use fixtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User, UserFilter};

/// Column list for `users` queries.
const COLUMNS: &str = "id, plant_id, name, email, role, is_active, created_at, updated_at";

/// Provides CRUD and directory operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Create a user.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (plant_id, name, email, role) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(input.plant_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// List users, optionally filtered by plant and/or role.
    pub async fn list(pool: &PgPool, filter: &UserFilter) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users \
             WHERE ($1::BIGINT IS NULL OR plant_id = $1) \
               AND ($2::TEXT IS NULL OR role = $2) \
             ORDER BY plant_id, name"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(filter.plant_id)
            .bind(&filter.role)
            .fetch_all(pool)
            .await
    }

    /// Find a user by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a user. Returns `None` if the user does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET \
                name = COALESCE($2, name), \
                email = COALESCE($3, email), \
                role = COALESCE($4, role), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.role)
            .fetch_optional(pool)
            .await
    }

    /// Deactivate a user (soft delete). Deactivated users drop out of the
    /// recipient directory but keep their row for history.
    ///
    /// Returns `true` if an active user was found and deactivated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET is_active = FALSE, updated_at = NOW() \
             WHERE id = $1 AND is_active",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Email addresses of active users with the given role in a plant,
    /// looked up by plant name.
    pub async fn emails_for_plant_role(
        pool: &PgPool,
        plant: &str,
        role: &str,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT u.email FROM users u \
             JOIN plants p ON p.id = u.plant_id \
             WHERE p.name = $1 AND u.role = $2 AND u.is_active \
             ORDER BY u.email",
        )
        .bind(plant)
        .bind(role)
        .fetch_all(pool)
        .await
    }

    /// Display name of the active user with the given email, if any.
    pub async fn display_name_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT name FROM users WHERE email = $1 AND is_active")
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
