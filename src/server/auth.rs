//! Shared-secret gate for the `/api` routes.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::state::AppState;

/// Header carrying the access key.
pub const ACCESS_KEY_HEADER: &str = "x-access-key";

/// Reject requests without the configured access key.
pub async fn require_access_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.access_key.as_deref() else {
        return (StatusCode::FORBIDDEN, "API access key not configured").into_response();
    };

    let provided = request
        .headers()
        .get(ACCESS_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
        tracing::warn!(path = %request.uri().path(), "rejected request with bad access key");
        return (StatusCode::UNAUTHORIZED, "invalid access key").into_response();
    }

    next.run(request).await
}

/// Compare without short-circuiting on the first differing byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"secret", b"secret"));
        assert!(!constant_time_eq(b"secret", b"secreT"));
        assert!(!constant_time_eq(b"secret", b"secret!"));
        assert!(!constant_time_eq(b"", b"x"));
    }
}
