//! Tag handlers

use super::{api_error, persist, ApiError, SectionListing};
use crate::state::{AppState, ServerEvent};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use lexshelf_core::{LibraryError, NotFound, SectionId, Tag, TagId};
use serde::{Deserialize, Serialize};

pub async fn list_tags(State(state): State<AppState>) -> Json<Vec<Tag>> {
    Json(state.library.read().await.tags().list_tags().to_vec())
}

pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<TagId>,
) -> Result<Json<Tag>, ApiError> {
    let library = state.library.read().await;
    let tag = library.tags().get_tag(id).map_err(api_error)?;
    Ok(Json(tag.clone()))
}

#[derive(Debug, Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
    /// Falls back to the default tag color when omitted
    #[serde(default)]
    pub color: String,
}

/// Create an empty tag
pub async fn create_tag(
    State(state): State<AppState>,
    Json(request): Json<CreateTagRequest>,
) -> Result<(StatusCode, Json<Tag>), ApiError> {
    let tag = state
        .library
        .write()
        .await
        .create_tag(&request.name, &request.color)
        .map_err(api_error)?;
    persist(&state).await?;
    state.broadcast(ServerEvent::TagChanged { tag_id: tag.id });
    Ok((StatusCode::CREATED, Json(tag)))
}

/// Partial tag edit
#[derive(Debug, Deserialize)]
pub struct UpdateTagRequest {
    pub name: Option<String>,
    pub color: Option<String>,
}

/// Rename and/or recolor a tag
pub async fn update_tag(
    State(state): State<AppState>,
    Path(id): Path<TagId>,
    Json(request): Json<UpdateTagRequest>,
) -> Result<Json<Tag>, ApiError> {
    let tag = {
        let mut library = state.library.write().await;
        // Unknown ids fail even for an empty edit
        let mut tag = library.tags().get_tag(id).map_err(api_error)?.clone();
        if let Some(name) = &request.name {
            tag = library.rename_tag(id, name).map_err(api_error)?;
        }
        if let Some(color) = &request.color {
            tag = library.recolor_tag(id, color).map_err(api_error)?;
        }
        tag
    };
    persist(&state).await?;
    state.broadcast(ServerEvent::TagChanged { tag_id: id });
    Ok(Json(tag))
}

/// Delete a tag; unknown ids answer 404 without changing anything
pub async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<TagId>,
) -> Result<StatusCode, ApiError> {
    let removed = state.library.write().await.delete_tag(id);
    if !removed {
        return Err(api_error(LibraryError::NotFound(NotFound::Tag(id))));
    }
    persist(&state).await?;
    state.broadcast(ServerEvent::TagChanged { tag_id: id });
    Ok(StatusCode::NO_CONTENT)
}

/// Sections carrying a tag, by section id
pub async fn list_tag_sections(
    State(state): State<AppState>,
    Path(id): Path<TagId>,
) -> Result<Json<Vec<SectionListing>>, ApiError> {
    let library = state.library.read().await;
    let sections = library
        .sections_for_tag(id)
        .map_err(api_error)?
        .into_iter()
        .map(SectionListing::from)
        .collect();
    Ok(Json(sections))
}

#[derive(Debug, Serialize)]
pub struct MembershipResponse {
    pub tag_id: TagId,
    pub section_id: SectionId,
    /// Whether the call changed the tag
    pub changed: bool,
}

/// Attach a section to a tag
pub async fn add_tag_section(
    State(state): State<AppState>,
    Path((id, section_id)): Path<(TagId, SectionId)>,
) -> Result<Json<MembershipResponse>, ApiError> {
    let changed = state
        .library
        .write()
        .await
        .add_section_to_tag(id, section_id)
        .map_err(api_error)?;
    if changed {
        persist(&state).await?;
        state.broadcast(ServerEvent::TagChanged { tag_id: id });
    }
    Ok(Json(MembershipResponse {
        tag_id: id,
        section_id,
        changed,
    }))
}

/// Detach a section from a tag
pub async fn remove_tag_section(
    State(state): State<AppState>,
    Path((id, section_id)): Path<(TagId, SectionId)>,
) -> Result<Json<MembershipResponse>, ApiError> {
    let changed = state
        .library
        .write()
        .await
        .remove_section_from_tag(id, section_id)
        .map_err(api_error)?;
    if changed {
        persist(&state).await?;
        state.broadcast(ServerEvent::TagChanged { tag_id: id });
    }
    Ok(Json(MembershipResponse {
        tag_id: id,
        section_id,
        changed,
    }))
}
