use crate::errors::api::AuthError;
use crate::errors::internal::InternalError;
use poem_openapi::{ApiResponse, Object, payload::Json};
use std::fmt;

/// Standardized error response for admin endpoints
#[derive(Object, Debug)]
pub struct AdminErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Admin dashboard error types
#[derive(ApiResponse, Debug)]
pub enum AdminError {
    /// Missing, invalid or signed-out session
    #[oai(status = 401)]
    Unauthenticated(Json<AdminErrorResponse>),

    /// Authenticated account lacks the admin role
    #[oai(status = 403)]
    AdminRequired(Json<AdminErrorResponse>),

    /// Submission not found
    #[oai(status = 404)]
    SubmissionNotFound(Json<AdminErrorResponse>),

    /// Submissions could not be fetched from the store
    #[oai(status = 502)]
    FetchFailed(Json<AdminErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<AdminErrorResponse>),
}

impl AdminError {
    fn build(error: &str, message: String, status_code: u16) -> Json<AdminErrorResponse> {
        Json(AdminErrorResponse {
            error: error.to_string(),
            message,
            status_code,
        })
    }

    /// Create an Unauthenticated error carrying the auth failure message
    pub fn unauthenticated(message: String) -> Self {
        AdminError::Unauthenticated(Self::build("unauthenticated", message, 401))
    }

    /// Create an AdminRequired error
    pub fn admin_required() -> Self {
        AdminError::AdminRequired(Self::build(
            "admin_required",
            "Admin role required".to_string(),
            403,
        ))
    }

    /// Create a SubmissionNotFound error
    pub fn submission_not_found(id: &str) -> Self {
        AdminError::SubmissionNotFound(Self::build(
            "submission_not_found",
            format!("Submission not found: {}", id),
            404,
        ))
    }

    /// Create a FetchFailed error
    ///
    /// The dashboard surfaces fetch failures instead of showing an empty list.
    pub fn fetch_failed(err: InternalError) -> Self {
        tracing::error!("Error fetching submissions: {}", err);
        AdminError::FetchFailed(Self::build(
            "fetch_failed",
            "Failed to load submissions".to_string(),
            502,
        ))
    }

    /// Convert InternalError to AdminError
    ///
    /// Internal error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Account(_) => {
                Self::unauthenticated(AuthError::from_internal_error(err).message())
            }
            _ => {
                tracing::error!("Unexpected error in admin operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    fn internal_server_error() -> Self {
        AdminError::InternalError(Self::build(
            "internal_error",
            "An internal error occurred".to_string(),
            500,
        ))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        self.body().message.clone()
    }

    /// Get the HTTP status code from the error variant
    pub fn status_code(&self) -> u16 {
        self.body().status_code
    }

    fn body(&self) -> &AdminErrorResponse {
        match self {
            AdminError::Unauthenticated(json)
            | AdminError::AdminRequired(json)
            | AdminError::SubmissionNotFound(json)
            | AdminError::FetchFailed(json)
            | AdminError::InternalError(json) => &json.0,
        }
    }
}

impl From<AuthError> for AdminError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InternalError(_) => Self::internal_server_error(),
            other => Self::unauthenticated(other.message()),
        }
    }
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
