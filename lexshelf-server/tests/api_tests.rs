//! Integration tests for the Lexshelf Server API

use axum::http::StatusCode;
use axum_test::TestServer;
use lexshelf_core::remote::CatalogDocument;
use lexshelf_core::seed::{seed_catalog, seed_library};
use lexshelf_core::storage::LocalStorage;
use lexshelf_core::{Library, LibraryConfig};
use lexshelf_server::routes::create_router;
use lexshelf_server::state::{AppState, CATALOG_DOCUMENT, LIBRARY_SNAPSHOT};
use serde_json::{json, Value};
use std::future::IntoFuture;
use std::sync::Arc;
use tempfile::TempDir;

/// Create a test app state seeded with the demo library
fn create_test_state() -> (AppState, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let storage = Arc::new(LocalStorage::new(temp_dir.path()));
    let library = seed_library(LibraryConfig::default()).expect("seed library");

    let state = AppState::with_library(storage, library);
    (state, temp_dir)
}

/// Create a test server
fn create_test_server() -> (TestServer, TempDir) {
    let (state, temp_dir) = create_test_state();
    let app = create_router(state);
    let server = TestServer::new(app).expect("Failed to create test server");
    (server, temp_dir)
}

fn ids(values: &Value) -> Vec<u64> {
    values
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let (server, _temp_dir) = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_list_books_defaults_to_title_order() {
    let (server, _temp_dir) = create_test_server();

    let response = server.get("/api/v1/books").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total"], 7);
    assert_eq!(body["books"][0]["title"], "Civil Procedure Code, 1908");
}

#[tokio::test]
async fn test_list_pinned_books() {
    let (server, _temp_dir) = create_test_server();

    let response = server
        .get("/api/v1/books")
        .add_query_param("filter", "pinned")
        .add_query_param("sort", "recently_accessed")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ids(&body["books"]), vec![2, 1]);
}

#[tokio::test]
async fn test_search_books() {
    let (server, _temp_dir) = create_test_server();

    let response = server
        .get("/api/v1/books")
        .add_query_param("search", "  INDIAN ")
        .await;

    let body: Value = response.json();
    assert_eq!(ids(&body["books"]), vec![4, 2]);
}

#[tokio::test]
async fn test_home_shelves() {
    let (server, _temp_dir) = create_test_server();

    let body: Value = server.get("/api/v1/home").await.json();

    assert_eq!(ids(&body["pinned"]), vec![2, 1]);
    assert_eq!(ids(&body["recent"]), vec![2, 4, 1, 5, 3]);
    assert_eq!(ids(&body["new_arrivals"]), vec![7, 6]);
}

#[tokio::test]
async fn test_get_book_opens_it() {
    let (server, temp_dir) = create_test_server();

    let response = server.get("/api/v1/books/3").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["title"], "Code of Criminal Procedure, 1973");
    assert_eq!(body["sections"].as_array().unwrap().len(), 0);

    // Opening moves the book to the front of the recent shelf
    let home: Value = server.get("/api/v1/home").await.json();
    assert_eq!(home["recent"][0]["id"], 3);

    // and the snapshot is written
    assert!(temp_dir.path().join(LIBRARY_SNAPSHOT).exists());
}

#[tokio::test]
async fn test_get_book_not_found() {
    let (server, _temp_dir) = create_test_server();

    let response = server.get("/api/v1/books/999").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_toggle_pin() {
    let (server, _temp_dir) = create_test_server();

    let response = server.post("/api/v1/books/1/pin").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["is_pinned"], false);

    let body: Value = server
        .get("/api/v1/books")
        .add_query_param("filter", "pinned")
        .await
        .json();
    assert_eq!(ids(&body["books"]), vec![2]);
}

#[tokio::test]
async fn test_set_progress_clamps() {
    let (server, _temp_dir) = create_test_server();

    let response = server
        .put("/api/v1/books/3/progress")
        .json(&json!({ "percent": 250 }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["progress"], 100);
}

#[tokio::test]
async fn test_get_section() {
    let (server, _temp_dir) = create_test_server();

    let response = server.get("/api/v1/sections/202").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["book_id"], 2);
    assert_eq!(body["book_title"], "Indian Penal Code, 1860");
    let tags: Vec<&str> = body["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(tags, vec!["Important", "For Exam"]);
    assert!(body["share_text"]
        .as_str()
        .unwrap()
        .contains("from Indian Penal Code, 1860"));
}

#[tokio::test]
async fn test_next_section() {
    let (server, _temp_dir) = create_test_server();

    let response = server.get("/api/v1/sections/101/next").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"], 102);

    let response = server.get("/api/v1/sections/103/next").await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = server.get("/api/v1/sections/999/next").await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_previous_section_at_start() {
    let (server, _temp_dir) = create_test_server();

    let response = server.get("/api/v1/sections/201/previous").await;

    response.assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_toggle_favorite_records_notification() {
    let (server, _temp_dir) = create_test_server();

    let response = server.post("/api/v1/sections/102/favorite").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["is_favorite"], true);

    let favorites: Value = server.get("/api/v1/favorites").await.json();
    assert_eq!(ids(&favorites), vec![101, 102, 103, 202]);

    let feed: Value = server.get("/api/v1/notifications").await.json();
    assert_eq!(feed["unread"], 3);
    assert_eq!(feed["notifications"][0]["type"], "favorite");
}

#[tokio::test]
async fn test_tag_lifecycle() {
    let (server, _temp_dir) = create_test_server();

    let response = server
        .post("/api/v1/tags")
        .json(&json!({ "name": "  Landmark  " }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let tag: Value = response.json();
    assert_eq!(tag["id"], 4);
    assert_eq!(tag["name"], "Landmark");
    assert_eq!(tag["color"], "#4294ff");

    // Adding twice leaves a single membership
    let first: Value = server.put("/api/v1/tags/4/sections/101").await.json();
    let second: Value = server.put("/api/v1/tags/4/sections/101").await.json();
    assert_eq!(first["changed"], true);
    assert_eq!(second["changed"], false);

    let sections: Value = server.get("/api/v1/tags/4/sections").await.json();
    assert_eq!(ids(&sections), vec![101]);

    let response = server
        .patch("/api/v1/tags/4")
        .json(&json!({ "name": "Landmark Cases", "color": "#000000" }))
        .await;
    response.assert_status_ok();
    let tag: Value = response.json();
    assert_eq!(tag["name"], "Landmark Cases");
    assert_eq!(tag["color"], "#000000");

    server
        .delete("/api/v1/tags/4")
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .get("/api/v1/tags/4/sections")
        .await
        .assert_status_not_found();

    let tags: Value = server.get("/api/v1/tags").await.json();
    assert_eq!(ids(&tags), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_create_tag_rejects_blank_name() {
    let (server, _temp_dir) = create_test_server();

    let response = server
        .post("/api/v1/tags")
        .json(&json!({ "name": "   " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_tag_unknown_section() {
    let (server, _temp_dir) = create_test_server();

    let response = server.put("/api/v1/tags/1/sections/999").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_preferences_clamp_and_reset() {
    let (server, _temp_dir) = create_test_server();

    for _ in 0..10 {
        server
            .post("/api/v1/preferences")
            .json(&json!({ "command": "font_size", "step": "decrease" }))
            .await
            .assert_status_ok();
    }
    let body: Value = server.get("/api/v1/preferences").await.json();
    assert_eq!(body["font_size"], 12);
    assert_eq!(body["can_decrease_font_size"], false);

    let body: Value = server
        .post("/api/v1/preferences")
        .json(&json!({ "command": "align", "align": "center" }))
        .await
        .json();
    assert_eq!(body["text_align"], "center");

    let body: Value = server
        .post("/api/v1/preferences")
        .json(&json!({ "command": "reset" }))
        .await
        .json();
    assert_eq!(body["font_size"], 16);
    assert_eq!(body["text_align"], "left");
    assert_eq!(body["text_color"], "#1A1A1A");
}

#[tokio::test]
async fn test_theme_toggle_follows_text_color() {
    let (server, _temp_dir) = create_test_server();

    let response = server.put("/api/v1/theme").json(&json!({})).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["theme"], "dark");
    assert_eq!(body["palette"]["background"], "#000000");

    let prefs: Value = server.get("/api/v1/preferences").await.json();
    assert_eq!(prefs["text_color"], "#FFFFFF");
}

#[tokio::test]
async fn test_notifications_read_and_clear() {
    let (server, _temp_dir) = create_test_server();

    let feed: Value = server.get("/api/v1/notifications").await.json();
    assert_eq!(feed["unread"], 2);
    assert_eq!(feed["notifications"][0]["title"], "New Updates Available");
    assert_eq!(feed["notifications"][0]["display_time"], "Apr 12, 02:30 PM");

    server
        .put("/api/v1/notifications")
        .await
        .assert_status(StatusCode::NO_CONTENT);
    let feed: Value = server.get("/api/v1/notifications").await.json();
    assert_eq!(feed["unread"], 0);

    server
        .put("/api/v1/notifications/99")
        .await
        .assert_status_not_found();

    server
        .delete("/api/v1/notifications")
        .await
        .assert_status(StatusCode::NO_CONTENT);
    let feed: Value = server.get("/api/v1/notifications").await.json();
    assert!(feed["notifications"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_notification_settings_toggle() {
    let (server, _temp_dir) = create_test_server();

    let settings: Value = server
        .post("/api/v1/notification-settings/reminders")
        .await
        .json();
    assert_eq!(settings["reminders"], true);

    server
        .post("/api/v1/notification-settings/carrier_pigeon")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_auth_flow() {
    let (server, _temp_dir) = create_test_server();

    server
        .get("/api/v1/auth/me")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let response = server
        .post("/api/v1/auth/register")
        .json(&json!({
            "name": "Asha Rao",
            "email": "asha@example.com",
            "password": "secret"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let me: Value = server.get("/api/v1/auth/me").await.json();
    assert_eq!(me["email"], "asha@example.com");

    let profile: Value = server
        .put("/api/v1/auth/profile")
        .json(&json!({ "phone": "+91 98765 43210" }))
        .await
        .json();
    assert_eq!(profile["phone"], "+91 98765 43210");

    server
        .post("/api/v1/auth/logout")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "asha@example.com", "password": "wrong" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "asha@example.com", "password": "secret" }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_refresh_without_document_keeps_catalog() {
    let (server, _temp_dir) = create_test_server();

    let response = server.post("/api/v1/catalog/refresh").await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = server.get("/api/v1/books").await.json();
    assert_eq!(body["total"], 7);
}

#[tokio::test]
async fn test_refresh_from_document() {
    let (server, temp_dir) = create_test_server();

    let catalog = seed_catalog().unwrap();
    let document = CatalogDocument {
        books: catalog.books()[..2].to_vec(),
        sections: catalog
            .sections()
            .iter()
            .filter(|s| s.book_id == 1)
            .cloned()
            .collect(),
    };
    std::fs::write(
        temp_dir.path().join(CATALOG_DOCUMENT),
        serde_json::to_vec(&document).unwrap(),
    )
    .unwrap();

    let response = server.post("/api/v1/catalog/refresh").await;

    response.assert_status_ok();
    let summary: Value = response.json();
    assert_eq!(summary["books"], 2);
    assert_eq!(summary["sections"], 3);
    // Links to 202 and 203 are gone
    assert_eq!(summary["pruned_tag_links"], 3);

    // User flags survive the refresh
    let pinned: Value = server
        .get("/api/v1/books")
        .add_query_param("filter", "pinned")
        .await
        .json();
    assert_eq!(ids(&pinned["books"]), vec![2, 1]);
}

#[tokio::test]
async fn test_refresh_collapses_repeated_ids() {
    let (server, temp_dir) = create_test_server();

    let catalog = seed_catalog().unwrap();
    let book = catalog.get_book(1).unwrap().clone();
    let sections: Vec<_> = catalog
        .sections()
        .iter()
        .filter(|s| s.book_id == 1)
        .cloned()
        .collect();
    let document = CatalogDocument {
        books: vec![book.clone(), book],
        sections: sections.iter().chain(sections.iter()).cloned().collect(),
    };
    std::fs::write(
        temp_dir.path().join(CATALOG_DOCUMENT),
        serde_json::to_vec(&document).unwrap(),
    )
    .unwrap();

    let summary: Value = server.post("/api/v1/catalog/refresh").await.json();
    assert_eq!(summary["books"], 1);
    assert_eq!(summary["sections"], 3);

    let next: Value = server.get("/api/v1/sections/101/next").await.json();
    assert_eq!(next["id"], 102);
    let next: Value = server.get("/api/v1/sections/102/next").await.json();
    assert_eq!(next["id"], 103);
    server
        .get("/api/v1/sections/103/next")
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_concurrent_mutations_all_reach_snapshot() {
    let (server, temp_dir) = create_test_server();

    let (a, b, c, d) = tokio::join!(
        server.post("/api/v1/books/3/pin").into_future(),
        server.post("/api/v1/books/4/pin").into_future(),
        server.post("/api/v1/books/5/pin").into_future(),
        server.post("/api/v1/sections/102/favorite").into_future(),
    );
    for response in [a, b, c, d] {
        response.assert_status_ok();
    }

    let data = std::fs::read_to_string(temp_dir.path().join(LIBRARY_SNAPSHOT)).unwrap();
    let saved = Library::from_json(&data).unwrap();
    for book_id in [3, 4, 5] {
        assert!(saved.catalog().get_book(book_id).unwrap().is_pinned);
    }
    assert!(saved.catalog().get_section(102).unwrap().is_favorite);
    let leftovers: Vec<_> = std::fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .filter(|name| name != LIBRARY_SNAPSHOT)
        .collect();
    assert!(leftovers.is_empty(), "stray files: {:?}", leftovers);
}
