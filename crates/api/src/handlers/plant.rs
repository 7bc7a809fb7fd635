//! Handlers for the `/plants` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fixtrack_core::error::CoreError;
use fixtrack_core::types::DbId;
use fixtrack_db::models::plant::{CreatePlant, Plant, UpdatePlant};
use fixtrack_db::repositories::PlantRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/plants
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreatePlant>,
) -> AppResult<(StatusCode, Json<Plant>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Plant name must not be empty".into(),
        )));
    }
    let plant = PlantRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(plant)))
}

/// GET /api/v1/plants
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Plant>>>> {
    let plants = PlantRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: plants }))
}

/// GET /api/v1/plants/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Plant>> {
    let plant = PlantRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Plant", id }))?;
    Ok(Json(plant))
}

/// PUT /api/v1/plants/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePlant>,
) -> AppResult<Json<Plant>> {
    let plant = PlantRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Plant", id }))?;
    Ok(Json(plant))
}

/// DELETE /api/v1/plants/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = PlantRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Plant", id }))
    }
}
