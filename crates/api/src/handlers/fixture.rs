//! Handlers for the `/fixtures` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use fixtrack_core::error::CoreError;
use fixtrack_core::fixture::validate_thresholds;
use fixtrack_core::types::DbId;
use fixtrack_db::models::fixture::{
    CreateFixture, Fixture, RecordContacts, ResetContacts, UpdateFixture,
};
use fixtrack_db::models::notification::NotificationRecord;
use fixtrack_db::repositories::{FixtureRepo, NotificationLogRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Optional filters for fixture listings.
#[derive(Debug, Deserialize)]
pub struct FixtureFilter {
    pub plant_id: Option<DbId>,
}

/// How many log rows `GET /{id}/notifications` returns.
const NOTIFICATION_PAGE: i64 = 50;

/// POST /api/v1/fixtures
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateFixture>,
) -> AppResult<(StatusCode, Json<Fixture>)> {
    validate_thresholds(input.warning_at, input.contacts_limit)?;
    let fixture = FixtureRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(fixture)))
}

/// GET /api/v1/fixtures
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<FixtureFilter>,
) -> AppResult<Json<DataResponse<Vec<Fixture>>>> {
    let fixtures = FixtureRepo::list(&state.pool, filter.plant_id).await?;
    Ok(Json(DataResponse { data: fixtures }))
}

/// GET /api/v1/fixtures/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Fixture>> {
    let fixture = FixtureRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Fixture",
            id,
        }))?;
    Ok(Json(fixture))
}

/// PUT /api/v1/fixtures/{id}
///
/// Thresholds are validated against the merged state (incoming values over
/// current ones) so a partial update cannot invert the warning/limit order.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFixture>,
) -> AppResult<Json<Fixture>> {
    let existing = FixtureRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Fixture",
            id,
        }))?;

    let merged_warning = input.warning_at.or(existing.warning_at);
    let merged_limit = input.contacts_limit.or(existing.contacts_limit);
    validate_thresholds(merged_warning, merged_limit)?;

    let fixture = FixtureRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Fixture",
            id,
        }))?;
    Ok(Json(fixture))
}

/// DELETE /api/v1/fixtures/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = FixtureRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Fixture",
            id,
        }))
    }
}

/// POST /api/v1/fixtures/{id}/contacts -- add usage to the counter.
pub async fn record_contacts(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RecordContacts>,
) -> AppResult<Json<Fixture>> {
    let count = input.count.unwrap_or(1);
    if count <= 0 {
        return Err(AppError::Core(CoreError::Validation(format!(
            "count must be positive, got {count}"
        ))));
    }
    let fixture = FixtureRepo::add_contacts(&state.pool, id, count)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Fixture",
            id,
        }))?;
    Ok(Json(fixture))
}

/// POST /api/v1/fixtures/{id}/reset -- zero the counter, opening a new
/// notification epoch.
pub async fn reset_contacts(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ResetContacts>,
) -> AppResult<Json<Fixture>> {
    let fixture = FixtureRepo::reset_contacts(&state.pool, id, input.reset_by.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Fixture",
            id,
        }))?;
    Ok(Json(fixture))
}

/// GET /api/v1/fixtures/{id}/notifications -- recent dispatch history.
pub async fn list_notifications(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<NotificationRecord>>>> {
    // 404 for unknown fixtures rather than an empty history.
    FixtureRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Fixture",
            id,
        }))?;

    let records = NotificationLogRepo::list_for_fixture(&state.pool, id, NOTIFICATION_PAGE).await?;
    Ok(Json(DataResponse { data: records }))
}
