//! Signed session token issuance and verification.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use campusconnect_core::{Identity, Role};

/// Session token lifetime: 7 days.
pub const TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Claims carried by a session token.
///
/// The claim set is exactly the [`Identity`] plus issued-at/expiry; nothing
/// else rides in the token (no server-side session handle, no revocation id).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    /// Subject: persisted user id string or synthetic `demo-<role>` id.
    sub: String,
    email: String,
    role: Role,
    name: String,
    /// Issued-at (unix seconds).
    iat: i64,
    /// Expiry (unix seconds), strictly enforced with no leeway.
    exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token encoding failed: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
}

/// HS256 token service holding the process-wide signing secret.
///
/// Purely functional once constructed; the secret is established at startup
/// and held immutably for the process lifetime. Absence of the secret is a
/// startup precondition enforced by the configuration loader, not here.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is strict; no grace period.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a signed token carrying `identity` with a 7-day expiry.
    pub fn issue(&self, identity: &Identity) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: identity.id.clone(),
            email: identity.email.clone(),
            role: identity.role,
            name: identity.name.clone(),
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Verify a token and recover the identity it carries.
    ///
    /// Returns `None` on any failure: bad signature, malformed payload,
    /// tampering, expiry. Never an error to callers.
    pub fn verify(&self, token: &str) -> Option<Identity> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).ok()?;
        let claims = data.claims;

        Some(Identity {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
            name: claims.name,
        })
    }
}
