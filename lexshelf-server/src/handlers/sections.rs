//! Section handlers: reading, traversal and favorites

use super::{api_error, persist, ApiError};
use crate::state::{AppState, ServerEvent};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lexshelf_core::format::share_text;
use lexshelf_core::{Section, SectionId, SectionSummary, Tag};
use serde::Serialize;

/// A section with everything the reading screen shows
#[derive(Debug, Serialize)]
pub struct SectionResponse {
    #[serde(flatten)]
    pub section: Section,
    pub book_title: String,
    pub tags: Vec<Tag>,
    pub share_text: String,
}

pub async fn get_section(
    State(state): State<AppState>,
    Path(id): Path<SectionId>,
) -> Result<Json<SectionResponse>, ApiError> {
    let library = state.library.read().await;
    let catalog = library.catalog();

    let section = catalog.get_section(id).map_err(api_error)?.clone();
    let book_title = catalog
        .get_book(section.book_id)
        .map_err(api_error)?
        .title
        .clone();
    let tags = library
        .tags()
        .tags_for_section(id)
        .into_iter()
        .cloned()
        .collect();
    let share_text = share_text(catalog, id).map_err(api_error)?;

    Ok(Json(SectionResponse {
        section,
        book_title,
        tags,
        share_text,
    }))
}

/// Following section in the same book; 204 at the end of the book
pub async fn next_section(
    State(state): State<AppState>,
    Path(id): Path<SectionId>,
) -> Result<Response, ApiError> {
    let library = state.library.read().await;
    match library.catalog().next_section(id).map_err(api_error)? {
        Some(section) => Ok(Json(section.clone()).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// Preceding section in the same book; 204 at the start of the book
pub async fn previous_section(
    State(state): State<AppState>,
    Path(id): Path<SectionId>,
) -> Result<Response, ApiError> {
    let library = state.library.read().await;
    match library.catalog().previous_section(id).map_err(api_error)? {
        Some(section) => Ok(Json(section.clone()).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub id: SectionId,
    pub is_favorite: bool,
}

/// Flip a section's favorite flag
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<SectionId>,
) -> Result<Json<FavoriteResponse>, ApiError> {
    let favorite = state
        .library
        .write()
        .await
        .toggle_favorite(id)
        .map_err(api_error)?;
    persist(&state).await?;
    state.broadcast(ServerEvent::FavoriteToggled {
        section_id: id,
        favorite,
    });
    Ok(Json(FavoriteResponse {
        id,
        is_favorite: favorite,
    }))
}

/// Favorite sections in catalog order
pub async fn list_favorites(State(state): State<AppState>) -> Json<Vec<SectionSummary>> {
    Json(state.library.read().await.catalog().favorite_sections())
}
