// Errors layer - Error type definitions
pub mod api;
pub mod internal;
pub mod setup;
pub mod submission;

// Re-exports for convenience
pub use api::{AdminError, AuthError, SubmissionError};
pub use internal::{AccountError, InternalError};
pub use setup::SetupAdminError;
pub use submission::{SubmitError, ValidationError};
