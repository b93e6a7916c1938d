//! Catalog handlers: books, home shelves and refresh

use super::{api_error, persist, ApiError};
use crate::state::{AppState, ServerEvent, CATALOG_DOCUMENT};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use lexshelf_core::library::fetch_catalog;
use lexshelf_core::remote::StorageCatalog;
use lexshelf_core::{Book, BookFilter, BookId, BookSort, HomeView, RefreshSummary, Section};
use serde::{Deserialize, Serialize};

/// Query parameters for listing books
#[derive(Debug, Deserialize)]
pub struct ListBooksQuery {
    /// Title search
    pub search: Option<String>,

    #[serde(default)]
    pub filter: BookFilter,

    #[serde(default)]
    pub sort: BookSort,
}

/// List response
#[derive(Debug, Serialize)]
pub struct ListBooksResponse {
    pub books: Vec<Book>,
    pub total: usize,
}

/// List books: search, then filter, then sort
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<ListBooksQuery>,
) -> Json<ListBooksResponse> {
    let library = state.library.read().await;
    let books: Vec<Book> = library
        .catalog()
        .query_books(
            query.search.as_deref().unwrap_or_default(),
            query.filter,
            query.sort,
        )
        .into_iter()
        .cloned()
        .collect();

    Json(ListBooksResponse {
        total: books.len(),
        books,
    })
}

/// Pinned, recent and new books
pub async fn home(State(state): State<AppState>) -> Json<HomeView> {
    Json(state.library.read().await.home())
}

#[derive(Debug, Serialize)]
pub struct SectionListing {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub is_favorite: bool,
}

impl From<&Section> for SectionListing {
    fn from(section: &Section) -> Self {
        Self {
            id: section.id,
            title: section.title.clone(),
            description: section.description.clone(),
            is_favorite: section.is_favorite,
        }
    }
}

/// Book details response
#[derive(Debug, Serialize)]
pub struct BookResponse {
    #[serde(flatten)]
    pub book: Book,
    pub sections: Vec<SectionListing>,
}

/// Open a book: stamps its last-accessed time
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<BookId>,
) -> Result<Json<BookResponse>, ApiError> {
    let response = {
        let mut library = state.library.write().await;
        let book = library.catalog_mut().open_book(id).map_err(api_error)?.clone();
        let sections = library
            .catalog()
            .list_sections(id)
            .map_err(api_error)?
            .into_iter()
            .map(SectionListing::from)
            .collect();
        BookResponse { book, sections }
    };
    persist(&state).await?;
    Ok(Json(response))
}

/// Sections of a book in catalog order
pub async fn list_book_sections(
    State(state): State<AppState>,
    Path(id): Path<BookId>,
) -> Result<Json<Vec<SectionListing>>, ApiError> {
    let library = state.library.read().await;
    let sections = library
        .catalog()
        .list_sections(id)
        .map_err(api_error)?
        .into_iter()
        .map(SectionListing::from)
        .collect();
    Ok(Json(sections))
}

#[derive(Debug, Serialize)]
pub struct PinResponse {
    pub id: BookId,
    pub is_pinned: bool,
}

/// Flip a book's pin
pub async fn toggle_pin(
    State(state): State<AppState>,
    Path(id): Path<BookId>,
) -> Result<Json<PinResponse>, ApiError> {
    let pinned = state
        .library
        .write()
        .await
        .toggle_pin(id)
        .map_err(api_error)?;
    persist(&state).await?;
    state.broadcast(ServerEvent::PinToggled {
        book_id: id,
        pinned,
    });
    Ok(Json(PinResponse {
        id,
        is_pinned: pinned,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub percent: u8,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub id: BookId,
    pub progress: u8,
}

/// Record reading progress
pub async fn set_progress(
    State(state): State<AppState>,
    Path(id): Path<BookId>,
    Json(request): Json<ProgressRequest>,
) -> Result<Json<ProgressResponse>, ApiError> {
    let progress = state
        .library
        .write()
        .await
        .catalog_mut()
        .set_progress(id, request.percent)
        .map_err(api_error)?;
    persist(&state).await?;
    Ok(Json(ProgressResponse { id, progress }))
}

/// Replace the catalog from the stored catalog document
///
/// A failed fetch leaves the current catalog in place and answers 502.
pub async fn refresh_catalog(
    State(state): State<AppState>,
) -> Result<Json<RefreshSummary>, ApiError> {
    let remote = StorageCatalog::new(state.storage.clone(), CATALOG_DOCUMENT);

    // Fetch without holding the library lock
    let document = match fetch_catalog(&remote).await {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!("Catalog refresh failed, keeping last snapshot: {}", e);
            state.broadcast(ServerEvent::Error {
                message: e.to_string(),
            });
            return Err(api_error(e));
        }
    };

    let summary = state.library.write().await.apply_remote(document);
    persist(&state).await?;
    state.broadcast(ServerEvent::CatalogRefreshed {
        books: summary.books,
        sections: summary.sections,
    });
    Ok(Json(summary))
}
