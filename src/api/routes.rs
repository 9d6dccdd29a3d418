//! API Routes
//!
//! Configures the Axum router with all content service endpoints.

use axum::{middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::auth::require_session;
use super::handlers::{
    cache_stats_handler, delete_journal_handler, get_journal_handler, get_section_handler,
    health_handler, list_sections_handler, sign_media_handler, update_journal_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health` - Health check endpoint
/// - `GET /cache/stats` - Memoization cache statistics
/// - `GET /api/sections` - Ordered section list
/// - `GET /api/sections/:slug` - One section
/// - `GET /api/media/sign` - Short-lived media URL
/// - `GET|PUT|DELETE /api/journal/:id` - Journal entry for the signed-in user
///
/// # Middleware
/// - Session check on the protected prefixes
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/cache/stats", get(cache_stats_handler))
        .route("/api/sections", get(list_sections_handler))
        .route("/api/sections/:slug", get(get_section_handler))
        .route("/api/media/sign", get(sign_media_handler))
        .route(
            "/api/journal/:id",
            get(get_journal_handler)
                .put(update_journal_handler)
                .delete(delete_journal_handler),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_session))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
