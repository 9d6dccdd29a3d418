//! Route protection middleware
//!
//! Consults the [`SessionGate`](crate::content::SessionGate) once per request
//! to a protected path. Requests without a session are redirected to the
//! login page with the original path preserved in `redirectTo`.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use super::handlers::AppState;

/// Where unauthenticated visitors are sent
pub const LOGIN_PATH: &str = "/login";

/// Returns true when `path` equals a prefix or lies beneath it.
pub fn is_protected(path: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| {
        let prefix = prefix.trim_end_matches('/');
        path == prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Builds `/login?redirectTo=<encoded path>`.
pub fn login_redirect_target(original_path: &str) -> String {
    format!(
        "{}?redirectTo={}",
        LOGIN_PATH,
        urlencoding::encode(original_path)
    )
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))?
        .trim();
    (!token.is_empty()).then_some(token)
}

/// Middleware guarding the configured path prefixes.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    if !is_protected(&path, &state.protected_prefixes) {
        return next.run(req).await;
    }

    let status = state.gate.check(&path, bearer_token(req.headers())).await;
    match status.principal {
        Some(principal) if status.authenticated => {
            req.extensions_mut().insert(principal);
            next.run(req).await
        }
        _ => {
            debug!(path = %path, "unauthenticated request, redirecting to login");
            Redirect::temporary(&login_redirect_target(&path)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn prefixes() -> Vec<String> {
        vec!["/api".to_string(), "/journal/".to_string()]
    }

    #[test]
    fn test_is_protected() {
        assert!(is_protected("/api", &prefixes()));
        assert!(is_protected("/api/sections", &prefixes()));
        assert!(is_protected("/journal", &prefixes()));
        assert!(is_protected("/journal/abc", &prefixes()));
        assert!(!is_protected("/apis", &prefixes()));
        assert!(!is_protected("/health", &prefixes()));
        assert!(!is_protected("/", &prefixes()));
    }

    #[test]
    fn test_login_redirect_target_encodes_path() {
        assert_eq!(
            login_redirect_target("/api/journal/1"),
            "/login?redirectTo=%2Fapi%2Fjournal%2F1"
        );
    }

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&headers), Some("abc"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic xyz"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}
