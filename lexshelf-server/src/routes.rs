//! API routes

use crate::handlers;
use crate::state::AppState;
use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

fn cors_layer() -> CorsLayer {
    // LEXSHELF_CORS_ORIGINS is a comma-separated list of origins, or "*" for any
    let origins = match std::env::var("LEXSHELF_CORS_ORIGINS").ok() {
        Some(origins) if origins == "*" => AllowOrigin::from(Any),
        Some(origins) => {
            let allowed: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            AllowOrigin::list(allowed)
        }
        // Local development frontends
        None => AllowOrigin::list([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://localhost:8081"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
            HeaderValue::from_static("http://127.0.0.1:8081"),
        ]),
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Catalog
        .route("/home", get(handlers::home))
        .route("/books", get(handlers::list_books))
        .route("/books/:id", get(handlers::get_book))
        .route("/books/:id/sections", get(handlers::list_book_sections))
        .route("/books/:id/pin", post(handlers::toggle_pin))
        .route("/books/:id/progress", put(handlers::set_progress))
        .route("/catalog/refresh", post(handlers::refresh_catalog))
        // Sections
        .route("/sections/:id", get(handlers::get_section))
        .route("/sections/:id/next", get(handlers::next_section))
        .route("/sections/:id/previous", get(handlers::previous_section))
        .route("/sections/:id/favorite", post(handlers::toggle_favorite))
        .route("/favorites", get(handlers::list_favorites))
        // Tags
        .route("/tags", get(handlers::list_tags).post(handlers::create_tag))
        .route(
            "/tags/:id",
            get(handlers::get_tag)
                .patch(handlers::update_tag)
                .delete(handlers::delete_tag),
        )
        .route("/tags/:id/sections", get(handlers::list_tag_sections))
        .route(
            "/tags/:id/sections/:section_id",
            put(handlers::add_tag_section).delete(handlers::remove_tag_section),
        )
        // Reading preferences
        .route(
            "/preferences",
            get(handlers::get_preferences).post(handlers::update_preferences),
        )
        .route("/theme", get(handlers::get_theme).put(handlers::set_theme))
        // Notifications
        .route(
            "/notifications",
            get(handlers::list_notifications)
                .put(handlers::mark_all_notifications_read)
                .delete(handlers::clear_notifications),
        )
        .route("/notifications/:id", put(handlers::mark_notification_read))
        .route(
            "/notification-settings",
            get(handlers::get_notification_settings),
        )
        .route(
            "/notification-settings/:key",
            post(handlers::toggle_notification_setting),
        )
        // Session
        .route("/auth/login", post(handlers::login))
        .route("/auth/register", post(handlers::register))
        .route("/auth/logout", post(handlers::logout))
        .route("/auth/me", get(handlers::current_user))
        .route("/auth/profile", put(handlers::update_profile))
        // SSE endpoint
        .route("/sync", get(handlers::sync_events));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}
