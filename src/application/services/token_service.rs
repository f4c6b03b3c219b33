//! Stateless session tokens.
//!
//! Tokens are HS256 JWTs signed with the server secret. Possession of an
//! unexpired, correctly signed token is proof of identity; there is no
//! server-side session table and no revocation list, so a leaked token stays
//! valid until it expires.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error};

use crate::error::AppError;

/// Default token lifetime.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Claims embedded in every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: String,
    pub username: String,
    /// Unix timestamp (seconds).
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Unix timestamp (seconds).
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

/// Issues and validates signed session tokens.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Creates a token service over a server-held secret.
    ///
    /// # Arguments
    ///
    /// - `secret` - HMAC key; loaded once from `TOKEN_SIGNING_SECRET`
    /// - `ttl` - lifetime of issued tokens
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Lifetime of tokens issued by this service.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a token for a user, valid from now for [`Self::ttl`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if signing fails.
    pub fn issue(&self, user_id: &str, username: &str) -> Result<String, AppError> {
        self.issue_at(user_id, username, Utc::now())
    }

    /// Issues a token as if the current time were `issued_at`.
    pub fn issue_at(
        &self,
        user_id: &str,
        username: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = Claims {
            user_id: user_id.to_string(),
            username: username.to_string(),
            issued_at: issued_at.timestamp(),
            expires_at: (issued_at + self.ttl).timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| {
            error!(error = %e, "jwt signing failed");
            AppError::internal("Failed to issue token", json!({}))
        })?;

        debug!(user_id = %user_id, "jwt signed");
        Ok(token)
    }

    /// Verifies signature and expiry and returns the embedded claims.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for expired, tampered, or malformed tokens.
    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        match decode::<Claims>(token, &self.decoding, &self.validation) {
            Ok(data) => {
                debug!(user_id = %data.claims.user_id, "jwt verified");
                Ok(data.claims)
            }
            Err(e) => {
                let reason = match e.kind() {
                    ErrorKind::ExpiredSignature => "Token expired",
                    ErrorKind::InvalidSignature => "Invalid token signature",
                    _ => "Malformed token",
                };
                debug!(error = %e, reason, "jwt rejected");
                Err(AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": reason }),
                ))
            }
        }
    }
}
