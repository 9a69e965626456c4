//! Runtime configuration, loaded from the environment at startup.

use anyhow::anyhow;

/// Process configuration.
///
/// The signing secret is a hard startup requirement: the server refuses to
/// boot without it rather than falling back to a guessable default.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HS256 signing secret for session tokens.
    pub jwt_secret: String,
    /// Name of the session cookie.
    pub cookie_name: String,
    /// Listen address.
    pub bind: String,
    /// Whether cookies carry the `Secure` attribute.
    pub secure_cookies: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt_secret = std::env::var("CAMPUSCONNECT_JWT_SECRET")
            .map_err(|_| anyhow!("CAMPUSCONNECT_JWT_SECRET must be set"))?;
        if jwt_secret.trim().is_empty() {
            return Err(anyhow!("CAMPUSCONNECT_JWT_SECRET must not be empty"));
        }

        let cookie_name =
            std::env::var("CAMPUSCONNECT_COOKIE_NAME").unwrap_or_else(|_| "cc_session".to_string());
        let bind =
            std::env::var("CAMPUSCONNECT_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let secure_cookies = std::env::var("CAMPUSCONNECT_ENV")
            .map(|env| env.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        Ok(Self {
            jwt_secret,
            cookie_name,
            bind,
            secure_cookies,
        })
    }
}
