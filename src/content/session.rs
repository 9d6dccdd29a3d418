//! Session gate contract consulted by the route-protection middleware.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::trace;

use crate::models::SessionStatus;

#[async_trait]
pub trait SessionGate: Send + Sync {
    /// Checks whether the request to `request_path` carries a valid session.
    async fn check(&self, request_path: &str, bearer_token: Option<&str>) -> SessionStatus;
}

// == Static Token Gate ==
/// Accepts a fixed set of bearer tokens, each bound to one user id.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenGate {
    tokens: HashMap<String, String>,
}

impl StaticTokenGate {
    pub fn new(tokens: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl SessionGate for StaticTokenGate {
    async fn check(&self, request_path: &str, bearer_token: Option<&str>) -> SessionStatus {
        match bearer_token.and_then(|token| self.tokens.get(token)) {
            Some(user_id) => {
                trace!(path = request_path, user = %user_id, "session accepted");
                SessionStatus::signed_in(user_id.clone())
            }
            None => {
                trace!(path = request_path, "no valid session");
                SessionStatus::anonymous()
            }
        }
    }
}
