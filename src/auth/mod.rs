pub mod password;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;

/// Scheme label prepended to issued tokens and expected in `Authorization`.
pub const TOKEN_SCHEME: &str = "JWT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: Uuid,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    #[error("JWT token has expired")]
    Expired,

    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("Invalid token lifetime: {0}s")]
    InvalidTtl(u64),
}

/// Signs and verifies HS256 tokens with the server secret.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl_secs: u64) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }

        let ttl = i64::try_from(ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or(JwtError::InvalidTtl(ttl_secs))?;

        // Expiry is exact: a token one second past its lifetime is rejected
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        })
    }

    pub fn from_config(config: &SecurityConfig) -> Result<Self, JwtError> {
        Self::new(&config.jwt_secret, config.token_ttl_secs)
    }

    pub fn issue(&self, user_id: Uuid, username: &str) -> Result<String, JwtError> {
        self.issue_at(user_id, username, Utc::now())
    }

    /// Issues a token as if signed at `issued_at`.
    pub fn issue_at(
        &self,
        user_id: Uuid,
        username: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims {
            user_id,
            username: username.to_string(),
            exp: (issued_at + self.ttl).timestamp(),
            iat: issued_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }

    /// Verifies signature and expiry and returns the decoded claims
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        use jsonwebtoken::errors::ErrorKind;

        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::InvalidToken(e.to_string()),
            })
    }
}

/// Formats a token the way `/signin` returns it: `JWT <token>`
pub fn with_scheme(token: &str) -> String {
    format!("{} {}", TOKEN_SCHEME, token)
}
