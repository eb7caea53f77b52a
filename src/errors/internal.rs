use thiserror::Error;

/// Internal error type for store and backend operations
///
/// This is a hybrid error type that separates:
/// - Infrastructure errors (Database, Storage, Parse, Crypto) - shared by all stores
/// - Domain errors (Account) - specific to the auth backend
///
/// This error type is NOT exposed via API. API endpoints must explicitly
/// convert these to AuthError, SubmissionError or AdminError.
#[derive(Error, Debug)]
pub enum InternalError {
    // ============================================================
    // Infrastructure Errors (shared by all stores)
    // ============================================================

    /// Database query or operation failed
    #[error("Database error: {operation} failed: {source}")]
    Database {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    /// Object storage read or write failed
    #[error("Storage error: {operation} failed: {source}")]
    Storage {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a value (UUID, timestamp, JSON, etc.)
    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse {
        value_type: String,
        message: String,
    },

    /// Cryptographic operation failed (hashing, verification, etc.)
    #[error("Crypto error: {operation} failed: {message}")]
    Crypto {
        operation: String,
        message: String,
    },

    // ============================================================
    // Domain-Specific Errors
    // ============================================================

    /// Account and session errors raised by the auth backend
    #[error(transparent)]
    Account(#[from] AccountError),
}

impl InternalError {
    /// Create a database error with context
    pub fn database(operation: impl Into<String>, source: sea_orm::DbErr) -> Self {
        Self::Database {
            operation: operation.into(),
            source,
        }
    }

    /// Create a storage error with context
    pub fn storage(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Storage {
            operation: operation.into(),
            source,
        }
    }

    /// Create a parse error with context
    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }

    /// Create a crypto error with context
    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// Auth backend specific errors
#[derive(Error, Debug)]
pub enum AccountError {
    /// Invalid email or password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Email already registered
    #[error("User already exists: {0}")]
    DuplicateEmail(String),

    /// Email or password rejected before any write
    #[error("{0}")]
    InvalidInput(String),

    /// Account not found
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Invalid or malformed token
    #[error("Invalid token: {token_type} - {reason}")]
    InvalidToken {
        token_type: String,
        reason: String,
    },

    /// Token has expired
    #[error("Expired token: {0}")]
    ExpiredToken(String),

    /// Session was signed out or never existed
    #[error("Session not found")]
    SessionNotFound,
}

impl AccountError {
    /// Create an invalid token error
    pub fn invalid_token(token_type: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidToken {
            token_type: token_type.into(),
            reason: reason.into(),
        }
    }
}
