use async_trait::async_trait;

use crate::types::internal::Coordinates;

/// Why a position could not be obtained
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Geolocation permission denied")]
    PermissionDenied,

    #[error("Position unavailable: {0}")]
    Unavailable(String),
}

/// Device position capability used by the form's location assist
#[async_trait]
pub trait Geolocation: Send + Sync {
    /// Whether this environment can provide a position at all
    fn is_supported(&self) -> bool {
        true
    }

    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}
