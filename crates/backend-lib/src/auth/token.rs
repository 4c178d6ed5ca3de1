// ============================
// crates/backend-lib/src/auth/token.rs
// ============================
//! Bearer-token issuance and verification.
//!
//! Issuer and verifier share the same HMAC secret, so one service covers
//! both: login issues, the protected-route middleware verifies.
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Claims embedded in a bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub id: String,
    /// Username at the time of login
    pub username: String,
    /// Expiration (unix timestamp)
    pub exp: i64,
}

/// Token service holding the process-wide signing secret
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenService {
    /// Create a new token service with an HMAC secret
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
            ttl_secs,
        }
    }

    /// Issue a signed, time-limited token for a user
    pub fn issue(&self, user_id: &str, username: &str) -> Result<String, AppError> {
        let claims = Claims {
            id: user_id.to_string(),
            username: username.to_string(),
            exp: chrono::Utc::now().timestamp() + self.ttl_secs,
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Store(format!("token encode: {e}")))
    }

    /// Verify a token and extract its claims.
    /// Rejects bad signatures and expired tokens.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::InvalidToken(e.to_string()))
    }
}
