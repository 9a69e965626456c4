//! Consistent error responses.
//!
//! Failure bodies are always `{"error": <message>}`. Success bodies always
//! carry `"success": true`. Internal details (backend messages, hashes) never
//! reach a client; they are logged server-side instead.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use campusconnect_auth::PolicyError;
use campusconnect_core::DomainError;
use campusconnect_store::StoreError;

#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    Forbidden(String),
    NotFound,
    Validation(String),
    Conflict(String),
    Unavailable,
    Internal,
}

impl ApiError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service temporarily unavailable".to_string(),
            ),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<PolicyError> for ApiError {
    fn from(err: PolicyError) -> Self {
        match err {
            PolicyError::Forbidden { .. } => ApiError::Forbidden(err.to_string()),
            // Self-protection violations are request errors, not authz
            // failures: the caller holds the role, the action is just never
            // allowed against themselves.
            PolicyError::SelfProtection(msg) => ApiError::Validation(msg.to_string()),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => ApiError::Validation(msg),
            DomainError::InvalidId(msg) => ApiError::Validation(msg),
            DomainError::NotFound => ApiError::NotFound,
            DomainError::Conflict(msg) => ApiError::Conflict(msg),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => {
                tracing::warn!(error = %msg, "persistence unavailable");
                ApiError::Unavailable
            }
            StoreError::NotFound => ApiError::NotFound,
            StoreError::Domain(e) => e.into(),
            StoreError::Backend(msg) => {
                tracing::error!(error = %msg, "storage backend failure");
                ApiError::Internal
            }
        }
    }
}

impl From<campusconnect_auth::TokenError> for ApiError {
    fn from(err: campusconnect_auth::TokenError) -> Self {
        tracing::error!(error = %err, "token issuance failed");
        ApiError::Internal
    }
}

/// Success response: `"success": true` merged into the body object.
pub fn success(status: StatusCode, body: Value) -> Response {
    let mut body = body;
    if let Some(obj) = body.as_object_mut() {
        obj.insert("success".to_string(), Value::Bool(true));
    }
    (status, Json(body)).into_response()
}

pub fn ok(body: Value) -> Response {
    success(StatusCode::OK, body)
}

pub fn created(body: Value) -> Response {
    success(StatusCode::CREATED, body)
}
