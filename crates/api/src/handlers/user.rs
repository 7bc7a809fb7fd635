//! Handlers for the `/users` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use fixtrack_core::error::CoreError;
use fixtrack_core::recipients::is_dispatchable_email;
use fixtrack_core::roles::{ROLE_ADMIN, ROLE_ENGINEER, ROLE_TECHNICIAN};
use fixtrack_core::types::DbId;
use fixtrack_db::models::user::{CreateUser, UpdateUser, User, UserFilter};
use fixtrack_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Reject unknown role names before they hit the check constraint.
fn validate_role(role: &str) -> Result<(), AppError> {
    if role == ROLE_ADMIN || role == ROLE_ENGINEER || role == ROLE_TECHNICIAN {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "Unknown role '{role}'"
        ))))
    }
}

fn validate_email(email: &str) -> Result<(), AppError> {
    if is_dispatchable_email(email) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        ))))
    }
}

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    validate_role(&input.role)?;
    validate_email(&input.email)?;
    let user = UserRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/users
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<UserFilter>,
) -> AppResult<Json<DataResponse<Vec<User>>>> {
    let users = UserRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: users }))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user))
}

/// PUT /api/v1/users/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<User>> {
    if let Some(role) = &input.role {
        validate_role(role)?;
    }
    if let Some(email) = &input.email {
        validate_email(email)?;
    }
    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user))
}

/// DELETE /api/v1/users/{id} -- soft delete; the user drops out of the
/// recipient directory but keeps their row.
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deactivated = UserRepo::deactivate(&state.pool, id).await?;
    if deactivated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}
