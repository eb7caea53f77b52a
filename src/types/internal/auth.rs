use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::types::db::account;

/// Role name granted by the bootstrap routine
pub const ADMIN_ROLE: &str = "admin";

/// JWT Claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account id)
    pub sub: String,

    /// Session id; the token is only honoured while this session exists
    pub sid: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// An account known to the auth backend, without its credentials
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub email_confirmed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<account::Model> for Account {
    fn from(model: account::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            email_confirmed: model.email_confirmed,
            created_at: Utc.timestamp_opt(model.created_at, 0).single().unwrap_or_default(),
        }
    }
}

/// Tokens handed out on sign-in
#[derive(Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    pub account: Account,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .field("account", &self.account.id)
            .finish()
    }
}

/// Result of an insert-if-absent role write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleInsert {
    Inserted,
    AlreadyPresent,
}
