//! Notification feed handlers

use super::{api_error, persist, ApiError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use lexshelf_core::format::format_timestamp;
use lexshelf_core::types::{NotificationId, NotificationSettings, SettingKey};
use lexshelf_core::{LibraryError, Notification};
use serde::Serialize;

/// A notification with its display timestamp
#[derive(Debug, Serialize)]
pub struct NotificationEntry {
    #[serde(flatten)]
    pub notification: Notification,
    pub display_time: String,
}

#[derive(Debug, Serialize)]
pub struct NotificationsResponse {
    pub notifications: Vec<NotificationEntry>,
    pub unread: usize,
}

/// Feed, most recent first
pub async fn list_notifications(State(state): State<AppState>) -> Json<NotificationsResponse> {
    let library = state.library.read().await;
    let feed = library.notifications();
    let notifications = feed
        .list()
        .into_iter()
        .map(|n| NotificationEntry {
            display_time: format_timestamp(&n.timestamp),
            notification: n.clone(),
        })
        .collect();

    Json(NotificationsResponse {
        notifications,
        unread: feed.unread_count(),
    })
}

/// Mark one notification read
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(id): Path<NotificationId>,
) -> Result<StatusCode, ApiError> {
    state
        .library
        .write()
        .await
        .notifications_mut()
        .mark_read(id)
        .map_err(api_error)?;
    persist(&state).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Mark the whole feed read
pub async fn mark_all_notifications_read(
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    state.library.write().await.notifications_mut().mark_all_read();
    persist(&state).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear_notifications(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.library.write().await.notifications_mut().clear_all();
    persist(&state).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_notification_settings(
    State(state): State<AppState>,
) -> Json<NotificationSettings> {
    Json(*state.library.read().await.notifications().settings())
}

/// Flip a single notification switch
pub async fn toggle_notification_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<NotificationSettings>, ApiError> {
    let key: SettingKey = key
        .parse()
        .map_err(|e: String| api_error(LibraryError::Validation(e)))?;
    let settings = {
        let mut library = state.library.write().await;
        let settings = library.notifications_mut().settings_mut();
        settings.toggle(key);
        *settings
    };
    persist(&state).await?;
    Ok(Json(settings))
}
