//! Identity payload carried in signed tokens.

use serde::{Deserialize, Serialize};

/// Role assigned to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Guest,
    User,
    Admin,
}

impl Role {
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Kind of token a payload was embedded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    #[serde(rename = "access_token")]
    Access,
    #[serde(rename = "refresh_token")]
    Refresh,
    #[serde(rename = "guest_token")]
    Guest,
}

/// Decoded identity of the caller: the sole unit handed from session
/// resolution to the authorization gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub user_id: i64,
    pub user_role: Role,
    pub token_type: TokenKind,
}

impl Payload {
    /// Synthetic payload for callers that present no tokens at all.
    ///
    /// Invariant: subject id 0 and role guest, always together.
    pub const fn guest() -> Self {
        Self {
            user_id: 0,
            user_role: Role::Guest,
            token_type: TokenKind::Guest,
        }
    }
}
