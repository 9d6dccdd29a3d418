//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the memoization cache can hold
    pub cache_max_size: usize,
    /// Default cache TTL in milliseconds
    pub cache_default_ttl_ms: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup sweep interval in seconds
    pub cleanup_interval: u64,
    /// Validity of minted media URLs in seconds
    pub signed_url_ttl_secs: u64,
    /// Base URL the local signer builds media links against
    pub media_base_url: String,
    /// Path prefixes that require an authenticated session
    pub protected_prefixes: Vec<String>,
    /// Accepted bearer tokens and the user each one maps to
    pub session_tokens: Vec<(String, String)>,
    /// Optional JSON file the in-memory content store is seeded from
    pub content_seed_path: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 50)
    /// - `CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 300000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL_SECS` - Sweep frequency in seconds (default: 60)
    /// - `SIGNED_URL_TTL_SECS` - Media URL validity (default: 3600)
    /// - `MEDIA_BASE_URL` - Base for locally signed media URLs
    /// - `PROTECTED_PREFIXES` - Comma separated path prefixes (default: `/api`)
    /// - `SESSION_TOKENS` - Comma separated `token:user_id` pairs
    /// - `CONTENT_SEED_PATH` - JSON seed for the content store
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            cache_max_size: parse_var("CACHE_MAX_SIZE").unwrap_or(defaults.cache_max_size),
            cache_default_ttl_ms: parse_var("CACHE_DEFAULT_TTL_MS")
                .unwrap_or(defaults.cache_default_ttl_ms),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: parse_var("CLEANUP_INTERVAL_SECS")
                .unwrap_or(defaults.cleanup_interval),
            signed_url_ttl_secs: parse_var("SIGNED_URL_TTL_SECS")
                .unwrap_or(defaults.signed_url_ttl_secs),
            media_base_url: env::var("MEDIA_BASE_URL").unwrap_or(defaults.media_base_url),
            protected_prefixes: env::var("PROTECTED_PREFIXES")
                .map(|v| parse_prefixes(&v))
                .unwrap_or(defaults.protected_prefixes),
            session_tokens: env::var("SESSION_TOKENS")
                .map(|v| parse_session_tokens(&v))
                .unwrap_or_default(),
            content_seed_path: env::var("CONTENT_SEED_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn cache_default_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_default_ttl_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_max_size: 50,
            cache_default_ttl_ms: 300_000,
            server_port: 3000,
            cleanup_interval: 60,
            signed_url_ttl_secs: 3600,
            media_base_url: "http://localhost:3000/media".to_string(),
            protected_prefixes: vec!["/api".to_string()],
            session_tokens: Vec::new(),
            content_seed_path: None,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn parse_prefixes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| p.starts_with('/'))
        .map(str::to_string)
        .collect()
}

/// Parses `token:user,token:user`. Malformed pairs are skipped.
fn parse_session_tokens(raw: &str) -> Vec<(String, String)> {
    raw.split(',')
        .filter_map(|pair| {
            let (token, user) = pair.trim().split_once(':')?;
            let (token, user) = (token.trim(), user.trim());
            if token.is_empty() || user.is_empty() {
                None
            } else {
                Some((token.to_string(), user.to_string()))
            }
        })
        .collect()
}
