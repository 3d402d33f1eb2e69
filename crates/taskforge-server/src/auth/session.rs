//! Session resolution: deriving one identity payload per request.

use tracing::debug;

use super::claims::{Payload, Role};
use super::jwt::{TokenCodec, TokenError};

/// Freshly minted access/refresh pair, created together and emitted as
/// cookies by the HTTP layer.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Outcome of resolving the caller's token material.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub payload: Payload,
    /// Present only when a silent renewal occurred.
    pub issued: Option<TokenPair>,
}

/// Derives exactly one identity payload per request, performing at most
/// one round of renewal.
#[derive(Clone)]
pub struct SessionManager {
    codec: TokenCodec,
}

impl SessionManager {
    pub const fn new(codec: TokenCodec) -> Self {
        Self { codec }
    }

    pub const fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Mint the token pair handed out at login and registration.
    pub fn issue_pair(&self, user_id: i64, role: Role) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access: self.codec.issue_access_token(user_id, role)?,
            refresh: self.codec.issue_refresh_token(user_id, role)?,
        })
    }

    /// Resolve the caller's identity from the presented tokens.
    ///
    /// A present access token is decoded directly, whatever its state: an
    /// expired or invalid access token is a hard failure, not a trigger for
    /// renewal. The refresh path is consulted only when the access token is
    /// absent entirely.
    pub fn resolve(
        &self,
        access: Option<&str>,
        refresh: Option<&str>,
    ) -> Result<Resolution, TokenError> {
        let Some(access) = access else {
            return match refresh {
                None => Ok(Resolution {
                    payload: Payload::guest(),
                    issued: None,
                }),
                Some(refresh) => self.renew(refresh),
            };
        };

        Ok(Resolution {
            payload: self.codec.decode(access)?,
            issued: None,
        })
    }

    /// Mint a fresh pair from a still-valid refresh token.
    ///
    /// Both tokens are reissued together so the pair never goes stale
    /// halfway; the old refresh token is simply superseded.
    fn renew(&self, refresh: &str) -> Result<Resolution, TokenError> {
        let identity = self.codec.decode(refresh)?;
        let pair = self.issue_pair(identity.user_id, identity.user_role)?;

        // The payload handed to authorization comes from the token the
        // client will present next, not from the superseded refresh token.
        let payload = self.codec.decode(&pair.access)?;
        debug!(user_id = payload.user_id, "token pair renewed");

        Ok(Resolution {
            payload,
            issued: Some(pair),
        })
    }
}
