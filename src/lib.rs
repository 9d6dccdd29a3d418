//! Renewed - guidebook content delivery service
//!
//! Serves sections, media URLs and journal entries to signed-in users, with a
//! bounded TTL cache memoizing the expensive backend lookups.

pub mod api;
pub mod cache;
pub mod config;
pub mod content;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::BoundedTtlCache;
pub use config::Config;
pub use error::AppError;
pub use tasks::spawn_cleanup_task;
