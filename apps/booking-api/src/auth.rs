//! JWT identity gate and session-cookie semantics.
//!
//! The signed token is the only session record: no server-side session
//! store, no revocation list. Logout is purely the clearing cookie.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

/// Cookie name carrying the session token.
pub const SESSION_COOKIE: &str = "token";

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the principal's email).
    pub sub: String,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// JWT token manager.
pub struct TokenManager {
    secret: String,
    lifetime_days: i64,
}

impl TokenManager {
    /// Create a new token manager.
    pub fn new(secret: String, lifetime_days: i64) -> Self {
        TokenManager {
            secret,
            lifetime_days,
        }
    }

    /// Issue a signed session token for an email.
    pub fn issue(&self, email: &str) -> ApiResult<String> {
        let now = Utc::now();
        let exp = now + Duration::days(self.lifetime_days);

        let claims = Claims {
            sub: email.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ApiError::Unauthenticated(format!("Failed to issue token: {e}")))
    }

    /// Validate and decode a token.
    ///
    /// Missing, forged, and expired tokens all land here as
    /// `Unauthenticated`; the identity gate short-circuits before any
    /// operation runs.
    pub fn verify(&self, token: &str) -> ApiResult<Claims> {
        let validation = Validation::default();

        let token_data: TokenData<Claims> = decode(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| ApiError::Unauthenticated(format!("Invalid token: {e}")))?;

        Ok(token_data.claims)
    }

    /// Render the `Set-Cookie` value establishing a session.
    ///
    /// HTTP-only so scripts cannot read the token; SameSite=None + Secure
    /// because the consumer is served from a different origin.
    pub fn session_cookie(&self, token: &str) -> String {
        let max_age = self.lifetime_days * 86_400;
        format!(
            "{SESSION_COOKIE}={token}; Max-Age={max_age}; Path=/; HttpOnly; Secure; SameSite=None"
        )
    }

    /// Render the `Set-Cookie` value clearing the session (logout).
    pub fn clear_session_cookie(&self) -> String {
        format!("{SESSION_COOKIE}=; Max-Age=0; Path=/; HttpOnly; Secure; SameSite=None")
    }
}

/// Extract bearer token from an authorization header value.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}
