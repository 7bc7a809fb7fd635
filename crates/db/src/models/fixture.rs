//! Fixture entity model, DTOs, and the monitor candidate projection.

use fixtrack_core::fixture::FixtureKey;
use fixtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `fixtures` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Fixture {
    pub id: DbId,
    pub plant_id: DbId,
    pub adapter_code: String,
    pub fixture_type: String,
    pub project_name: String,
    pub owner_email: Option<String>,
    pub contacts: i64,
    pub warning_at: Option<i64>,
    pub contacts_limit: Option<i64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a new fixture. The counter always starts at zero.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFixture {
    pub plant_id: DbId,
    pub adapter_code: String,
    pub fixture_type: String,
    pub project_name: String,
    pub owner_email: Option<String>,
    pub warning_at: Option<i64>,
    pub contacts_limit: Option<i64>,
}

/// DTO for updating an existing fixture. All fields are optional; omitted
/// fields keep their current value.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFixture {
    pub project_name: Option<String>,
    pub owner_email: Option<String>,
    pub warning_at: Option<i64>,
    pub contacts_limit: Option<i64>,
}

/// DTO for `POST /fixtures/{id}/contacts`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordContacts {
    /// Number of contacts to add. Defaults to 1.
    pub count: Option<i64>,
}

/// DTO for `POST /fixtures/{id}/reset`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResetContacts {
    /// Free-form identification of who performed the reset.
    pub reset_by: Option<String>,
}

/// A fixture that passed the SQL-side candidate filters of one monitor pass.
///
/// The query already applied the threshold comparison and the reset-epoch /
/// cooldown idempotency check; owner-email validity is deliberately left to
/// the monitor so invalid owners can be counted as skipped.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FixtureCandidate {
    pub id: DbId,
    pub plant: String,
    pub adapter_code: String,
    pub fixture_type: String,
    pub project_name: String,
    pub owner_email: Option<String>,
    pub contacts: i64,
    pub warning_at: Option<i64>,
    pub contacts_limit: Option<i64>,
}

impl FixtureCandidate {
    /// Display identity used in messages and per-run caches.
    pub fn key(&self) -> FixtureKey {
        FixtureKey {
            plant: self.plant.clone(),
            adapter_code: self.adapter_code.clone(),
            fixture_type: self.fixture_type.clone(),
        }
    }
}
