//! User entity model and DTOs.
//!
//! Users double as the recipient directory: threshold notification CC
//! groups are the active users of a given role within a plant.

use fixtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub plant_id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub plant_id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Optional filters for user listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserFilter {
    pub plant_id: Option<DbId>,
    pub role: Option<String>,
}
