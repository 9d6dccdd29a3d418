//! Memoizing facade over the content store and the object signer.
//!
//! Section reads and minted media URLs are kept in one shared
//! [`BoundedTtlCache`]. Journal traffic is never cached.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::cache::BoundedTtlCache;
use crate::content::{ContentStore, ObjectSigner};
use crate::error::{AppError, Result};
use crate::models::{JournalEntry, JournalPatch, Principal, Section, SectionSummary};

const SECTIONS_KEY: &str = "sections:all";

/// Value type held by the content cache.
#[derive(Debug, Clone)]
pub enum CachedValue {
    Sections(Arc<Vec<SectionSummary>>),
    Section(Arc<Section>),
    SignedUrl(SignedUrl),
}

/// A minted media URL and the instant it stops working.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUrl {
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

impl SignedUrl {
    /// Whole seconds of validity left, never negative.
    pub fn expires_in(&self) -> u64 {
        u64::try_from((self.expires_at - Utc::now()).num_seconds()).unwrap_or(0)
    }
}

// == Cached Content ==
#[derive(Clone)]
pub struct CachedContent {
    store: Arc<dyn ContentStore>,
    signer: Arc<dyn ObjectSigner>,
    cache: BoundedTtlCache<CachedValue>,
}

impl CachedContent {
    pub fn new(
        store: Arc<dyn ContentStore>,
        signer: Arc<dyn ObjectSigner>,
        cache: BoundedTtlCache<CachedValue>,
    ) -> Self {
        Self {
            store,
            signer,
            cache,
        }
    }

    pub fn cache(&self) -> &BoundedTtlCache<CachedValue> {
        &self.cache
    }

    // == Sections ==
    pub async fn list_sections(&self) -> Result<Arc<Vec<SectionSummary>>> {
        if let Some(CachedValue::Sections(sections)) = self.cache.get(SECTIONS_KEY) {
            return Ok(sections);
        }

        let sections = Arc::new(self.store.list_sections().await?);
        debug!(count = sections.len(), "section list loaded from store");
        self.cache
            .set(SECTIONS_KEY, CachedValue::Sections(Arc::clone(&sections)));
        Ok(sections)
    }

    /// Looks a section up by slug. Misses are not cached.
    pub async fn section_by_slug(&self, slug: &str) -> Result<Arc<Section>> {
        let key = format!("section:{slug}");
        if let Some(CachedValue::Section(section)) = self.cache.get(&key) {
            return Ok(section);
        }

        let section = self
            .store
            .get_section_by_slug(slug)
            .await?
            .map(Arc::new)
            .ok_or_else(|| AppError::NotFound(format!("Section '{}'", slug)))?;

        self.cache.set(key, CachedValue::Section(Arc::clone(&section)));
        Ok(section)
    }

    // == Media ==
    /// Returns a media URL for `path` valid for about `ttl_secs` seconds.
    ///
    /// A cached URL is reused for at most half its validity so callers always
    /// receive one with a useful lifetime left.
    pub async fn signed_url(&self, path: &str, ttl_secs: u64) -> Result<SignedUrl> {
        let key = format!("signed:{ttl_secs}:{path}");
        if let Some(CachedValue::SignedUrl(signed)) = self.cache.get(&key) {
            return Ok(signed);
        }

        let issued_at = Utc::now();
        let url = self.signer.sign(path, ttl_secs).await?;
        let expires_at = i64::try_from(ttl_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .and_then(|validity| issued_at.checked_add_signed(validity))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let signed = SignedUrl { url, expires_at };

        let reuse_for = Duration::from_secs(ttl_secs / 2).min(self.cache.default_ttl());
        if !reuse_for.is_zero() {
            self.cache
                .set_with_ttl(key, CachedValue::SignedUrl(signed.clone()), reuse_for);
        }
        Ok(signed)
    }

    // == Journal ==
    pub async fn journal_entry(&self, principal: &Principal, id: Uuid) -> Result<JournalEntry> {
        self.store.get_journal_entry(principal, id).await
    }

    pub async fn update_journal_entry(
        &self,
        principal: &Principal,
        id: Uuid,
        patch: JournalPatch,
    ) -> Result<JournalEntry> {
        self.store.update_journal_entry(principal, id, patch).await
    }

    pub async fn delete_journal_entry(&self, principal: &Principal, id: Uuid) -> Result<()> {
        self.store.delete_journal_entry(principal, id).await
    }
}
