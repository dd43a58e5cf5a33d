//! User endpoints

use axum::extract::State;
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    extract::{AppJson, AppPath},
    models::{ApiResponse, NewUser, UpdateUser, User},
    state::AppState,
    validation,
};

/// Get all users
pub async fn get_users(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<User>>> {
    let users = state.user_repository.get_all().await?;

    Ok(ApiResponse::ok("Found.", users))
}

/// Get a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<ApiResponse<User>> {
    let user = state
        .user_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found.".to_string()))?;

    Ok(ApiResponse::ok("Found.", user))
}

/// Create a new user
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<NewUser>,
) -> ApiResult<ApiResponse<User>> {
    let new_user = payload.trimmed();
    validation::validate_new_user(&new_user).map_err(ApiError::Validation)?;

    if state
        .user_repository
        .find_by_phone_number(&new_user.phone_number)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict("User already exists.".to_string()));
    }

    let user = state.user_repository.create(&new_user).await?;
    info!(
        "User with phone number {} created successfully",
        user.phone_number
    );

    Ok(ApiResponse::created("User created successfully.", user))
}

/// Replace a user's fields
pub async fn update_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateUser>,
) -> ApiResult<ApiResponse<User>> {
    if payload.id.is_some_and(|body_id| body_id != id) {
        return Err(ApiError::Validation("Invalid User or Id.".to_string()));
    }

    let user = NewUser::from(payload).trimmed();
    validation::validate_new_user(&user).map_err(ApiError::Validation)?;

    let not_found = || ApiError::NotFound("User not found.".to_string());
    state
        .user_repository
        .find_by_id(id)
        .await?
        .ok_or_else(not_found)?;

    if let Some(other) = state
        .user_repository
        .find_by_phone_number(&user.phone_number)
        .await?
    {
        if other.id != id {
            return Err(ApiError::Conflict("User already exists.".to_string()));
        }
    }

    let updated = state
        .user_repository
        .update(id, &user)
        .await?
        .ok_or_else(not_found)?;
    info!("User with id {} updated successfully", id);

    Ok(ApiResponse::ok("User updated successfully.", updated))
}

/// Delete a user and their cart
pub async fn delete_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<ApiResponse<()>> {
    if !state.user_repository.delete(id).await? {
        return Err(ApiError::NotFound("User not found.".to_string()));
    }
    info!("User with id {} deleted successfully", id);

    Ok(ApiResponse::message("User deleted successfully."))
}
