use thiserror::Error;

use crate::errors::InternalError;

/// User-correctable form problems, shown before any network call
///
/// Messages are displayed verbatim inline and in notifications.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,

    #[error("Name must be less than 100 characters")]
    NameTooLong,

    #[error("Description is required")]
    DescriptionRequired,

    #[error("Description must be less than 2000 characters")]
    DescriptionTooLong,

    #[error("Photo is required")]
    PhotoRequired,

    /// Rejected at file selection
    #[error("Please upload a JPG or PNG image.")]
    UnsupportedPhotoType(String),

    /// Rejected at file selection
    #[error("Please upload an image smaller than 5MB.")]
    PhotoTooLarge(usize),

    #[error("Latitude and longitude must be provided together")]
    IncompleteCoordinates,
}

impl ValidationError {
    /// Notification title for rejections at file selection
    pub fn photo_rejection_title(&self) -> Option<&'static str> {
        match self {
            Self::UnsupportedPhotoType(_) => Some("Invalid file type"),
            Self::PhotoTooLarge(_) => Some("File too large"),
            _ => None,
        }
    }
}

/// Terminal failure of one submit attempt
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Photo could not be stored; nothing was written
    #[error("{0}")]
    Upload(#[source] InternalError),

    /// Photo was stored but the row insert failed
    #[error("{source}")]
    Insert {
        /// Key of the stored object left without a referencing row
        orphaned_object: String,
        #[source]
        source: InternalError,
    },

    /// A previous submit has not completed yet
    #[error("A submission is already in progress")]
    InFlight,
}
