//! The request authentication gate.
//!
//! Every protected route passes through [`auth_middleware`], which accepts a
//! bearer token or the session cookie, verifies it, and attaches the caller's
//! [`CallerContext`] to the request. Rejection happens before any body is
//! read.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use campusconnect_auth::TokenService;

use crate::context::CallerContext;

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<TokenService>,
    pub cookie_name: Arc<str>,
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(token) = extract_token(req.headers(), &state.cookie_name) else {
        return unauthorized("authentication required");
    };

    let Some(identity) = state.tokens.verify(&token) else {
        return unauthorized("invalid or expired token");
    };

    req.extensions_mut().insert(CallerContext::new(identity));
    next.run(req).await
}

fn unauthorized(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
}

/// Bearer header first, session cookie second.
///
/// Also used by the anonymous event reads to resolve an optional caller.
pub(crate) fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(token) = extract_bearer(headers) {
        return Some(token.to_string());
    }
    extract_cookie(headers, cookie_name)
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

fn extract_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let header = headers.get(header::COOKIE)?.to_str().ok()?;
    for pair in header.split(';') {
        let Some((name, value)) = pair.trim().split_once('=') else {
            continue;
        };
        if name == cookie_name && !value.is_empty() {
            return Some(value.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                axum::http::header::HeaderName::try_from(*name).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn bearer_takes_precedence_over_cookie() {
        let h = headers(&[
            ("authorization", "Bearer from-header"),
            ("cookie", "cc_session=from-cookie"),
        ]);
        assert_eq!(
            extract_token(&h, "cc_session"),
            Some("from-header".to_string())
        );
    }

    #[test]
    fn cookie_is_found_among_others() {
        let h = headers(&[("cookie", "theme=dark; cc_session=tok123; lang=en")]);
        assert_eq!(extract_token(&h, "cc_session"), Some("tok123".to_string()));
    }

    #[test]
    fn empty_or_missing_credentials_yield_none() {
        assert_eq!(extract_token(&headers(&[]), "cc_session"), None);
        let h = headers(&[("authorization", "Bearer ")]);
        assert_eq!(extract_token(&h, "cc_session"), None);
        let h = headers(&[("cookie", "cc_session=")]);
        assert_eq!(extract_token(&h, "cc_session"), None);
    }
}
