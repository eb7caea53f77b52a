use crate::errors::submission::{SubmitError, ValidationError};
use poem_openapi::{ApiResponse, Object, payload::Json};
use std::fmt;

pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to upload photo";
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit. Please try again.";

/// Standardized error response for submission endpoints
#[derive(Object, Debug)]
pub struct SubmissionErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Submission intake error types
#[derive(ApiResponse, Debug)]
pub enum SubmissionError {
    /// Photo is not a JPG/PNG or exceeds 5MB
    #[oai(status = 400)]
    InvalidPhoto(Json<SubmissionErrorResponse>),

    /// A form field failed validation
    #[oai(status = 400)]
    ValidationFailed(Json<SubmissionErrorResponse>),

    /// Photo upload to object storage failed
    #[oai(status = 502)]
    UploadFailed(Json<SubmissionErrorResponse>),

    /// Submission row could not be written
    #[oai(status = 502)]
    InsertFailed(Json<SubmissionErrorResponse>),

    /// A submission from this form is already in progress
    #[oai(status = 409)]
    InFlight(Json<SubmissionErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<SubmissionErrorResponse>),
}

impl SubmissionError {
    fn build(error: &str, message: String, status_code: u16) -> Json<SubmissionErrorResponse> {
        Json(SubmissionErrorResponse {
            error: error.to_string(),
            message,
            status_code,
        })
    }

    /// Create an error from a rejected field or photo
    pub fn from_validation_error(err: ValidationError) -> Self {
        match err {
            ValidationError::UnsupportedPhotoType(_) | ValidationError::PhotoTooLarge(_) => {
                SubmissionError::InvalidPhoto(Self::build("invalid_photo", err.to_string(), 400))
            }
            _ => SubmissionError::ValidationFailed(Self::build(
                "validation_failed",
                err.to_string(),
                400,
            )),
        }
    }

    /// Convert a submit outcome into an API error
    ///
    /// Backend failures are logged; clients get a fixed message.
    pub fn from_submit_error(err: SubmitError) -> Self {
        match err {
            SubmitError::Validation(validation) => Self::from_validation_error(validation),
            SubmitError::Upload(source) => {
                tracing::error!("Photo upload failed: {}", source);
                SubmissionError::UploadFailed(Self::build(
                    "upload_failed",
                    UPLOAD_FAILED_MESSAGE.to_string(),
                    502,
                ))
            }
            SubmitError::Insert { orphaned_object, source } => {
                tracing::error!("Submission insert failed (object {} kept): {}", orphaned_object, source);
                SubmissionError::InsertFailed(Self::build(
                    "insert_failed",
                    SUBMIT_FAILED_MESSAGE.to_string(),
                    502,
                ))
            }
            SubmitError::InFlight => SubmissionError::InFlight(Self::build(
                "in_flight",
                SubmitError::InFlight.to_string(),
                409,
            )),
        }
    }

    /// Create a generic internal server error
    pub fn internal_server_error() -> Self {
        SubmissionError::InternalError(Self::build(
            "internal_error",
            SUBMIT_FAILED_MESSAGE.to_string(),
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

    fn body(&self) -> &SubmissionErrorResponse {
        match self {
            SubmissionError::InvalidPhoto(json)
            | SubmissionError::ValidationFailed(json)
            | SubmissionError::UploadFailed(json)
            | SubmissionError::InsertFailed(json)
            | SubmissionError::InFlight(json)
            | SubmissionError::InternalError(json) => &json.0,
        }
    }
}

impl From<SubmitError> for SubmissionError {
    fn from(err: SubmitError) -> Self {
        Self::from_submit_error(err)
    }
}

impl From<ValidationError> for SubmissionError {
    fn from(err: ValidationError) -> Self {
        Self::from_validation_error(err)
    }
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
