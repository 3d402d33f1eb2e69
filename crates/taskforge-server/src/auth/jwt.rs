//! Token issuance and validation.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use taskforge_core::db::unix_timestamp;

use super::claims::{Payload, Role, TokenKind};

/// Token failure classes.
///
/// `Expired` and `Invalid` are deliberately distinct: only a token that
/// decodes cleanly may drive a renewal upstream, while `Invalid` is fatal
/// everywhere and is never downgraded to a guest identity.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signature checked out but the embedded expiry has passed.
    #[error("token expired")]
    Expired,

    /// Bad signature, malformed structure, or unsupported algorithm.
    #[error("invalid token")]
    Invalid,

    /// Signing a fresh token failed.
    #[error("token signing failed")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Wire shape of the signed claims.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    user_id: i64,
    user_role: Role,
    token_type: TokenKind,
    /// Issued at (unix timestamp).
    iat: i64,
    /// Expiration (unix timestamp).
    exp: i64,
}

/// Signs and verifies the compact token payload.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl TokenCodec {
    /// Create a new `TokenCodec` with the given secret and lifetimes.
    pub fn new(secret: &[u8], access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    pub const fn access_ttl_secs(&self) -> i64 {
        self.access_ttl_secs
    }

    pub const fn refresh_ttl_secs(&self) -> i64 {
        self.refresh_ttl_secs
    }

    /// Issue an access token for the given identity.
    pub fn issue_access_token(&self, user_id: i64, role: Role) -> Result<String, TokenError> {
        self.issue(user_id, role, TokenKind::Access, self.access_ttl_secs)
    }

    /// Issue a refresh token for the given identity.
    pub fn issue_refresh_token(&self, user_id: i64, role: Role) -> Result<String, TokenError> {
        self.issue(user_id, role, TokenKind::Refresh, self.refresh_ttl_secs)
    }

    fn issue(
        &self,
        user_id: i64,
        role: Role,
        kind: TokenKind,
        ttl_secs: i64,
    ) -> Result<String, TokenError> {
        let now = unix_timestamp();
        let claims = Claims {
            user_id,
            user_role: role,
            token_type: kind,
            iat: now,
            exp: now + ttl_secs,
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    /// Verify a token and return its payload.
    ///
    /// Expiry is checked against the current time with zero leeway.
    pub fn decode(&self, token: &str) -> Result<Payload, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })?;

        Ok(Payload {
            user_id: data.claims.user_id,
            user_role: data.claims.user_role,
            token_type: data.claims.token_type,
        })
    }
}
