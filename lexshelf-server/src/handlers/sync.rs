//! Server-Sent Events handler for real-time updates

use crate::state::{AppState, ServerEvent};
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use serde_json::json;
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

fn encode(event: ServerEvent) -> (&'static str, String) {
    let (name, data) = match event {
        ServerEvent::PinToggled { book_id, pinned } => {
            ("pin_toggled", json!({ "book_id": book_id, "pinned": pinned }))
        }
        ServerEvent::FavoriteToggled {
            section_id,
            favorite,
        } => (
            "favorite_toggled",
            json!({ "section_id": section_id, "favorite": favorite }),
        ),
        ServerEvent::TagChanged { tag_id } => ("tag_changed", json!({ "tag_id": tag_id })),
        ServerEvent::PreferencesChanged => ("preferences_changed", json!({})),
        ServerEvent::CatalogRefreshed { books, sections } => (
            "catalog_refreshed",
            json!({ "books": books, "sections": sections }),
        ),
        ServerEvent::Error { message } => ("error", json!({ "message": message })),
    };
    (name, data.to_string())
}

/// SSE endpoint for library changes
pub async fn sync_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(state.subscribe());

    let event_stream = stream.filter_map(|result| match result {
        Ok(event) => {
            let (name, data) = encode(event);
            Some(Ok(Event::default().event(name).data(data)))
        }
        // Lagged receivers skip missed events
        Err(_) => None,
    });

    Sse::new(event_stream).keep_alive(KeepAlive::default())
}
