// API-facing error types
pub mod admin;
pub mod auth;
pub mod submission;

// Re-exports for convenience
pub use admin::AdminError;
pub use auth::AuthError;
pub use submission::SubmissionError;
