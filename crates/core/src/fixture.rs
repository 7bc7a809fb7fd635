//! Fixture identity and threshold write-path validation.

use serde::Serialize;

use crate::error::CoreError;

/// Display identity of a fixture: `(plant, adapter code, fixture type)`.
///
/// Used for message composition and per-run caching in the threshold
/// monitor. The database identity is the BIGSERIAL `fixtures.id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FixtureKey {
    pub plant: String,
    pub adapter_code: String,
    pub fixture_type: String,
}

impl std::fmt::Display for FixtureKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.plant, self.adapter_code, self.fixture_type
        )
    }
}

/// Validate a warning/limit threshold pair on the write path.
///
/// Either value may be absent. When set, each must be positive; when both
/// are set, `warning_at` must be strictly below `contacts_limit` so the
/// warning band is non-empty.
pub fn validate_thresholds(
    warning_at: Option<i64>,
    contacts_limit: Option<i64>,
) -> Result<(), CoreError> {
    if let Some(w) = warning_at {
        if w <= 0 {
            return Err(CoreError::Validation(format!(
                "warning_at must be positive, got {w}"
            )));
        }
    }
    if let Some(l) = contacts_limit {
        if l <= 0 {
            return Err(CoreError::Validation(format!(
                "contacts_limit must be positive, got {l}"
            )));
        }
    }
    if let (Some(w), Some(l)) = (warning_at, contacts_limit) {
        if w >= l {
            return Err(CoreError::Validation(format!(
                "warning_at ({w}) must be below contacts_limit ({l})"
            )));
        }
    }
    Ok(())
}
