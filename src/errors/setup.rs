use thiserror::Error;

use crate::errors::InternalError;

/// Failures of the admin bootstrap routine
#[derive(Error, Debug)]
pub enum SetupAdminError {
    /// Setup key did not match; no backend call was made
    #[error("Invalid setup key")]
    InvalidSetupKey,

    /// A backend call failed; `message` is passed through to the caller
    #[error("{message}")]
    Backend {
        step: &'static str,
        message: String,
        #[source]
        source: InternalError,
    },
}

impl SetupAdminError {
    /// Wrap a backend failure, falling back to a fixed message per step
    pub fn backend(step: &'static str, fallback: &str, source: InternalError) -> Self {
        let message = source.to_string();
        let message = if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        };

        Self::Backend {
            step,
            message,
            source,
        }
    }
}
