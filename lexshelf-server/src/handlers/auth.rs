//! Session and profile handlers

use super::{auth_status, ApiError};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use lexshelf_core::types::ProfileUpdate;
use lexshelf_core::{AuthError, User};
use serde::Deserialize;

fn auth_error(err: AuthError) -> ApiError {
    (auth_status(&err), err.to_string())
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .identity
        .login(&request.email, &request.password)
        .await
        .map_err(auth_error)?;
    tracing::info!(user_id = %user.id, "user signed in");
    Ok(Json(user))
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state
        .identity
        .register(&request.name, &request.email, &request.password)
        .await
        .map_err(auth_error)?;
    tracing::info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn logout(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.identity.logout().await.map_err(auth_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// The signed-in user; 401 when signed out
pub async fn current_user(State(state): State<AppState>) -> Result<Json<User>, ApiError> {
    state
        .identity
        .current_user()
        .await
        .map(Json)
        .ok_or_else(|| auth_error(AuthError::NotAuthenticated))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .identity
        .update_profile(update)
        .await
        .map_err(auth_error)?;
    Ok(Json(user))
}
