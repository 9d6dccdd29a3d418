//! API Handlers
//!
//! HTTP request handlers for each content service endpoint.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Extension, Json,
};
use uuid::Uuid;

use crate::cache::{BoundedTtlCache, CacheStatsSnapshot};
use crate::config::Config;
use crate::content::{
    CachedContent, InMemoryContentStore, LocalObjectSigner, SessionGate, StaticTokenGate,
};
use crate::error::{AppError, Result};
use crate::models::{
    DeleteResponse, HealthResponse, JournalEntry, Principal, Section, SectionSummary, SignQuery,
    SignedUrlResponse, UpdateJournalRequest,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cached facade over the content store and signer
    pub content: CachedContent,
    /// Session check for protected paths
    pub gate: Arc<dyn SessionGate>,
    /// Path prefixes that require a session
    pub protected_prefixes: Arc<Vec<String>>,
    /// Media URL validity when the caller does not ask for one
    pub signed_url_ttl_secs: u64,
}

impl AppState {
    /// Creates a new AppState protecting `/api` with hour-long media URLs.
    pub fn new(content: CachedContent, gate: Arc<dyn SessionGate>) -> Self {
        let defaults = Config::default();
        Self {
            content,
            gate,
            protected_prefixes: Arc::new(defaults.protected_prefixes),
            signed_url_ttl_secs: defaults.signed_url_ttl_secs,
        }
    }

    pub fn with_protected_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.protected_prefixes = Arc::new(prefixes);
        self
    }

    pub fn with_signed_url_ttl(mut self, ttl_secs: u64) -> Self {
        self.signed_url_ttl_secs = ttl_secs;
        self
    }

    /// Builds the local composition: in-memory store (seeded when configured),
    /// local signer, static token gate, and one cache instance.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let store = match &config.content_seed_path {
            Some(path) => InMemoryContentStore::from_seed_file(path)
                .context("initializing content store")?,
            None => InMemoryContentStore::new(),
        };

        let cache = BoundedTtlCache::new(config.cache_max_size, config.cache_default_ttl());
        let content = CachedContent::new(
            Arc::new(store),
            Arc::new(LocalObjectSigner::new(config.media_base_url.clone())),
            cache,
        );
        let gate = StaticTokenGate::new(config.session_tokens.iter().cloned());

        Ok(Self::new(content, Arc::new(gate))
            .with_protected_prefixes(config.protected_prefixes.clone())
            .with_signed_url_ttl(config.signed_url_ttl_secs))
    }

    /// Handle to the shared memoization cache.
    pub fn cache(&self) -> &BoundedTtlCache<crate::content::CachedValue> {
        self.content.cache()
    }
}

fn require_principal(principal: Option<Extension<Principal>>) -> Result<Principal> {
    principal
        .map(|Extension(p)| p)
        .ok_or_else(|| AppError::Unauthorized("Sign in to access your journal".to_string()))
}

fn parse_entry_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::ValidationFailed(format!("'{}' is not a valid journal entry id", raw)))
}

/// Handler for GET /api/sections
pub async fn list_sections_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<SectionSummary>>> {
    let sections = state.content.list_sections().await?;
    Ok(Json(sections.as_ref().clone()))
}

/// Handler for GET /api/sections/:slug
pub async fn get_section_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Section>> {
    let section = state.content.section_by_slug(&slug).await?;
    Ok(Json(section.as_ref().clone()))
}

/// Handler for GET /api/media/sign?path=&ttl=
pub async fn sign_media_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<SignQuery>, QueryRejection>,
) -> Result<Json<SignedUrlResponse>> {
    let Query(query) = query?;
    if let Some(error_msg) = query.validate() {
        return Err(AppError::ValidationFailed(error_msg));
    }

    let ttl = query.ttl.unwrap_or(state.signed_url_ttl_secs);
    let signed = state.content.signed_url(query.path.trim(), ttl).await?;

    Ok(Json(SignedUrlResponse::new(signed.url.clone(), signed.expires_in())))
}

/// Handler for GET /api/journal/:id
pub async fn get_journal_handler(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
    Path(id): Path<String>,
) -> Result<Json<JournalEntry>> {
    let principal = require_principal(principal)?;
    let id = parse_entry_id(&id)?;

    let entry = state.content.journal_entry(&principal, id).await?;
    Ok(Json(entry))
}

/// Handler for PUT /api/journal/:id
pub async fn update_journal_handler(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UpdateJournalRequest>, JsonRejection>,
) -> Result<Json<JournalEntry>> {
    let principal = require_principal(principal)?;
    let id = parse_entry_id(&id)?;
    let Json(req) = payload?;
    let patch = req.validate().map_err(AppError::ValidationFailed)?;

    let entry = state.content.update_journal_entry(&principal, id, patch).await?;
    Ok(Json(entry))
}

/// Handler for DELETE /api/journal/:id
pub async fn delete_journal_handler(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let principal = require_principal(principal)?;
    let id = parse_entry_id(&id)?;

    state.content.delete_journal_entry(&principal, id).await?;
    Ok(Json(DeleteResponse::new(id.to_string())))
}

/// Handler for GET /cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsSnapshot> {
    Json(state.cache().stats())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
