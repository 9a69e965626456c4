use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use uuid::Uuid;

use campusconnect_core::DomainError;
use campusconnect_store::{Collection, Document};

use crate::app::errors::ApiError;

pub mod assignments;
pub mod auth;
pub mod courses;
pub mod discussions;
pub mod events;
pub mod groups;
pub mod notifications;
pub mod resources;
pub mod system;
pub mod users;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/auth/me", get(auth::me))
        .route("/auth/logout", post(auth::logout))
        .nest("/users", users::router())
        .nest("/courses", courses::router())
        .nest("/assignments", assignments::router())
        .merge(events::router())
        .nest("/discussions", discussions::router())
        .nest("/groups", groups::router())
        .nest("/resources", resources::router())
        .nest("/notifications", notifications::router())
}

/// Parse a typed id from a path segment; parse failures are 400s.
pub fn parse_id<T>(raw: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = DomainError>,
{
    T::from_str(raw).map_err(ApiError::from)
}

/// Find a document or report 404.
pub async fn fetch<T: Document>(
    collection: &Arc<dyn Collection<T>>,
    id: Uuid,
) -> Result<T, ApiError> {
    collection.find(id).await?.ok_or(ApiError::NotFound)
}
