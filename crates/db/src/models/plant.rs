//! Plant entity model and DTOs.

use fixtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `plants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Plant {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new plant.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlant {
    pub name: String,
}

/// DTO for renaming a plant.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePlant {
    pub name: Option<String>,
}
