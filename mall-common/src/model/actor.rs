//! Actor registration, login, and session types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ActorId;

/// Role an actor authenticates as.
///
/// The backend exposes a separate join/login endpoint family per role;
/// the role recorded on the account decides which routes accept its token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform operator: coupons, moderation, cross-seller visibility.
    Admin,
    /// Merchant: products and the inquiries/comments on them.
    Seller,
    /// Customer: inquiries, comments, orders.
    Buyer,
}

impl Role {
    /// Path segment used by the auth endpoint family (`/auth/{role}/join`).
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Admin => "admins",
            Self::Seller => "sellers",
            Self::Buyer => "buyers",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Admin => "admin",
            Self::Seller => "seller",
            Self::Buyer => "buyer",
        };
        write!(f, "{label}")
    }
}

/// Opaque bearer token identifying one authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(pub String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Registration request (`join`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRequest {
    /// Login email; unique per role family.
    pub email: String,
    /// Plaintext password; the harness only ever sends generated values.
    pub password: String,
    /// Display name shown on resources the actor creates.
    pub name: String,
}

/// Re-authentication request (`login`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response to a successful join or login.
///
/// Carries the account identity plus the session token the connection
/// must attach to subsequent calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizedActor {
    /// Account identifier.
    pub id: ActorId,
    /// Role the account was registered under.
    pub role: Role,
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Bearer token for this session. Superseded by the next join/login.
    pub token: SessionToken,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}
