//! HTTP application wiring (Axum router + shared services).
//!
//! Layout:
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses and the success envelope

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use campusconnect_auth::{DemoDirectory, TokenService};
use campusconnect_store::Store;

use crate::config::AppConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

/// Shared service handles available to every handler via `Extension`.
pub struct AppServices {
    pub store: Store,
    pub tokens: Arc<TokenService>,
    pub demo: DemoDirectory,
    pub cookie_name: String,
    pub secure_cookies: bool,
}

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// API tests).
pub fn build_app(config: AppConfig, store: Store) -> Router {
    let tokens = Arc::new(TokenService::new(config.jwt_secret.as_bytes()));
    let demo = DemoDirectory::from_env();

    let auth_state = middleware::AuthState {
        tokens: tokens.clone(),
        cookie_name: Arc::from(config.cookie_name.as_str()),
    };

    let services = Arc::new(AppServices {
        store,
        tokens,
        demo,
        cookie_name: config.cookie_name,
        secure_cookies: config.secure_cookies,
    });

    // Ungated surface: health, login/register, and anonymous event reads.
    let public = Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::auth::public_router())
        .merge(routes::events::public_router());

    // Everything else requires the authentication gate.
    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(Extension(services))
}
