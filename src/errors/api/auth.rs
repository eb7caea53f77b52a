use crate::errors::internal::{AccountError, InternalError};
use poem_openapi::{ApiResponse, Object, payload::Json};
use std::fmt;

/// Standardized error response for authentication endpoints
#[derive(Object, Debug)]
pub struct AuthErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Authentication error types
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// Invalid email or password
    #[oai(status = 401)]
    InvalidCredentials(Json<AuthErrorResponse>),

    /// Invalid or malformed JWT
    #[oai(status = 401)]
    InvalidToken(Json<AuthErrorResponse>),

    /// JWT has expired
    #[oai(status = 401)]
    ExpiredToken(Json<AuthErrorResponse>),

    /// Session was signed out
    #[oai(status = 401)]
    SessionEnded(Json<AuthErrorResponse>),

    /// Invalid refresh token
    #[oai(status = 401)]
    InvalidRefreshToken(Json<AuthErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<AuthErrorResponse>),
}

impl AuthError {
    fn build(error: &str, message: &str, status_code: u16) -> Json<AuthErrorResponse> {
        Json(AuthErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
            status_code,
        })
    }

    /// Create an InvalidCredentials error
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(Self::build(
            "invalid_credentials",
            "Invalid email or password",
            401,
        ))
    }

    /// Create an InvalidToken error
    pub fn invalid_token() -> Self {
        AuthError::InvalidToken(Self::build("invalid_token", "Invalid or malformed JWT", 401))
    }

    /// Create an ExpiredToken error
    pub fn expired_token() -> Self {
        AuthError::ExpiredToken(Self::build("expired_token", "JWT has expired", 401))
    }

    /// Create a SessionEnded error
    pub fn session_ended() -> Self {
        AuthError::SessionEnded(Self::build("session_ended", "Session has been signed out", 401))
    }

    /// Create an InvalidRefreshToken error
    pub fn invalid_refresh_token() -> Self {
        AuthError::InvalidRefreshToken(Self::build(
            "invalid_refresh_token",
            "Invalid or expired refresh token",
            401,
        ))
    }

    /// Create a generic internal server error
    ///
    /// Always returns a generic message without exposing internal details.
    fn internal_server_error() -> Self {
        AuthError::InternalError(Self::build("internal_error", "An internal error occurred", 500))
    }

    /// Convert InternalError to AuthError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Internal error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Account(AccountError::InvalidCredentials)
            | InternalError::Account(AccountError::UserNotFound(_)) => Self::invalid_credentials(),
            InternalError::Account(AccountError::InvalidToken { token_type, .. }) => {
                if token_type == "refresh_token" {
                    Self::invalid_refresh_token()
                } else {
                    Self::invalid_token()
                }
            }
            InternalError::Account(AccountError::ExpiredToken(token_type)) => {
                if token_type == "refresh_token" {
                    Self::invalid_refresh_token()
                } else {
                    Self::expired_token()
                }
            }
            InternalError::Account(AccountError::SessionNotFound) => Self::session_ended(),
            _ => {
                tracing::error!("Unexpected error in auth operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        self.body().message.clone()
    }

    /// Get the HTTP status code from the error variant
    pub fn status_code(&self) -> u16 {
        self.body().status_code
    }

    fn body(&self) -> &AuthErrorResponse {
        match self {
            AuthError::InvalidCredentials(json)
            | AuthError::InvalidToken(json)
            | AuthError::ExpiredToken(json)
            | AuthError::SessionEnded(json)
            | AuthError::InvalidRefreshToken(json)
            | AuthError::InternalError(json) => &json.0,
        }
    }
}

impl From<InternalError> for AuthError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
