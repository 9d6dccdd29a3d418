//! Object signer contract: turns a stored object path into a time-limited URL.

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};

use crate::error::{AppError, Result};

#[async_trait]
pub trait ObjectSigner: Send + Sync {
    /// Mints a retrieval URL for `path` valid for `ttl_secs` seconds.
    async fn sign(&self, path: &str, ttl_secs: u64) -> Result<String>;
}

// == Local Object Signer ==
/// Development signer that appends an expiry to a plain media URL.
///
/// It does not sign anything; production deployments plug in the storage
/// provider's signer instead.
#[derive(Debug, Clone)]
pub struct LocalObjectSigner {
    base_url: String,
}

impl LocalObjectSigner {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ObjectSigner for LocalObjectSigner {
    async fn sign(&self, path: &str, ttl_secs: u64) -> Result<String> {
        let path = path.trim_matches('/');
        if path.is_empty() {
            return Err(AppError::Upstream("storage rejected an empty object path".to_string()));
        }

        let expires = i64::try_from(ttl_secs)
            .ok()
            .and_then(ChronoDuration::try_seconds)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .ok_or_else(|| AppError::ValidationFailed(format!("TTL {} is too large", ttl_secs)))?
            .timestamp();

        let encoded: Vec<String> = path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();

        Ok(format!("{}/{}?expires={}", self.base_url, encoded.join("/"), expires))
    }
}
