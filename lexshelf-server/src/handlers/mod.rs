//! Request handlers

mod auth;
mod books;
mod notifications;
mod preferences;
mod sections;
mod sync;
mod tags;

pub use auth::*;
pub use books::*;
pub use notifications::*;
pub use preferences::*;
pub use sections::*;
pub use sync::*;
pub use tags::*;

use crate::state::AppState;
use axum::{http::StatusCode, Json};
use lexshelf_core::{AuthError, LibraryError, RemoteError};
use serde::Serialize;

/// Error half of every handler result
pub type ApiError = (StatusCode, String);

/// Map a core error to a status code and message
pub(crate) fn api_error(err: LibraryError) -> ApiError {
    let status = match &err {
        LibraryError::NotFound(_) => StatusCode::NOT_FOUND,
        LibraryError::Validation(_) => StatusCode::BAD_REQUEST,
        LibraryError::Remote(RemoteError::Auth(e)) => auth_status(e),
        LibraryError::Remote(RemoteError::Fetch(_)) => StatusCode::BAD_GATEWAY,
        LibraryError::Storage(_) | LibraryError::Serialization(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.to_string())
}

pub(crate) fn auth_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::InvalidCredentials | AuthError::NotAuthenticated => StatusCode::UNAUTHORIZED,
        AuthError::Registration(_) | AuthError::InvalidProfile(_) => StatusCode::BAD_REQUEST,
    }
}

/// Persist the snapshot after a mutation
pub(crate) async fn persist(state: &AppState) -> Result<(), ApiError> {
    state.save_library().await.map_err(|e| {
        tracing::error!("Failed to save library snapshot: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
