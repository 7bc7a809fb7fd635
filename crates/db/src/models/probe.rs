//! Probe inventory model and DTOs.

use fixtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `probes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Probe {
    pub id: DbId,
    pub fixture_id: DbId,
    pub part_number: String,
    pub qty: i32,
    pub created_at: Timestamp,
}

/// DTO for adding a probe line to a fixture.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProbe {
    pub part_number: String,
    pub qty: i32,
}

/// DTO for updating a probe line. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProbe {
    pub part_number: Option<String>,
    pub qty: Option<i32>,
}
