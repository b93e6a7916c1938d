//! Error types for Lexshelf Core

use crate::types::{BookId, NotificationId, SectionId, TagId};
use thiserror::Error;

/// Result type alias using LibraryError
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Top-level error type for all Lexshelf operations
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Not found: {0}")]
    NotFound(#[from] NotFound),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Remote failure: {0}")]
    Remote(#[from] RemoteError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LibraryError {
    /// Whether this error is a missing-record lookup
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<FetchError> for LibraryError {
    fn from(err: FetchError) -> Self {
        Self::Remote(RemoteError::Fetch(err))
    }
}

impl From<AuthError> for LibraryError {
    fn from(err: AuthError) -> Self {
        Self::Remote(RemoteError::Auth(err))
    }
}

/// Lookup of an unknown record id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NotFound {
    #[error("book {0}")]
    Book(BookId),

    #[error("section {0}")]
    Section(SectionId),

    #[error("tag {0}")]
    Tag(TagId),

    #[error("notification {0}")]
    Notification(NotificationId),
}

/// Failures reported by external collaborators
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("catalog fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),
}

/// Errors raised by a remote catalog source
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    #[error("malformed catalog payload: {0}")]
    Malformed(String),
}

/// Errors raised by an identity provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("registration rejected: {0}")]
    Registration(String),

    #[error("no user is signed in")]
    NotAuthenticated,

    #[error("invalid profile: {0}")]
    InvalidProfile(String),
}

/// Errors that occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Backend error: {0}")]
    BackendError(String),
}
