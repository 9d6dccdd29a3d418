//! API Module
//!
//! HTTP handlers, session middleware and routing for the content service.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /cache/stats` - Cache statistics
//! - `GET /api/sections`, `GET /api/sections/:slug` - Guidebook sections
//! - `GET /api/media/sign` - Short-lived media URL
//! - `GET|PUT|DELETE /api/journal/:id` - Journal entries

pub mod auth;
pub mod handlers;
pub mod routes;

pub use auth::require_session;
pub use handlers::*;
pub use routes::create_router;
