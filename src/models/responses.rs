//! Response DTOs for the content service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Response body for `GET /api/media/sign`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlResponse {
    pub url: String,
    /// Seconds the URL stays valid from issue time
    pub expires_in: u64,
}

impl SignedUrlResponse {
    pub fn new(url: impl Into<String>, expires_in: u64) -> Self {
        Self {
            url: url.into(),
            expires_in,
        }
    }
}

/// Response body for `DELETE /api/journal/:id`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The entry that was deleted
    pub id: String,
}

impl DeleteResponse {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            message: format!("Journal entry '{}' deleted successfully", id),
            id,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
