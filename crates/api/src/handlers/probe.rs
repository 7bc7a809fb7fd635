//! Handlers for the `/fixtures/{fixture_id}/probes` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fixtrack_core::error::CoreError;
use fixtrack_core::types::DbId;
use fixtrack_db::models::probe::{CreateProbe, Probe, UpdateProbe};
use fixtrack_db::repositories::{FixtureRepo, ProbeRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/fixtures/{fixture_id}/probes
pub async fn create(
    State(state): State<AppState>,
    Path(fixture_id): Path<DbId>,
    Json(input): Json<CreateProbe>,
) -> AppResult<(StatusCode, Json<Probe>)> {
    if input.qty <= 0 {
        return Err(AppError::Core(CoreError::Validation(format!(
            "qty must be positive, got {}",
            input.qty
        ))));
    }
    FixtureRepo::find_by_id(&state.pool, fixture_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Fixture",
            id: fixture_id,
        }))?;

    let probe = ProbeRepo::create(&state.pool, fixture_id, &input).await?;
    Ok((StatusCode::CREATED, Json(probe)))
}

/// GET /api/v1/fixtures/{fixture_id}/probes
pub async fn list_for_fixture(
    State(state): State<AppState>,
    Path(fixture_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Probe>>>> {
    let probes = ProbeRepo::list_for_fixture(&state.pool, fixture_id).await?;
    Ok(Json(DataResponse { data: probes }))
}

/// PUT /api/v1/fixtures/{fixture_id}/probes/{id}
pub async fn update(
    State(state): State<AppState>,
    Path((fixture_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateProbe>,
) -> AppResult<Json<Probe>> {
    if let Some(qty) = input.qty {
        if qty <= 0 {
            return Err(AppError::Core(CoreError::Validation(format!(
                "qty must be positive, got {qty}"
            ))));
        }
    }
    let probe = ProbeRepo::update(&state.pool, fixture_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Probe", id }))?;
    Ok(Json(probe))
}

/// DELETE /api/v1/fixtures/{fixture_id}/probes/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((fixture_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let deleted = ProbeRepo::delete(&state.pool, fixture_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Probe", id }))
    }
}
