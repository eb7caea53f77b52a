use poem_openapi::types::multipart::Upload;
use poem_openapi::{Multipart, Object};

use crate::types::internal::Submission;

/// Multipart body of the public submission form
///
/// Every field is optional at the transport level so that missing values
/// surface as validation messages instead of a generic parse failure.
#[derive(Multipart)]
pub struct SubmissionFormData {
    pub name: Option<String>,
    pub description: Option<String>,
    /// JPG or PNG, max 5MB
    pub photo: Option<Upload>,
    pub location_city: Option<String>,
    pub location_state: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A stored submission
#[derive(Object, Debug, Clone)]
pub struct SubmissionResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub photo_url: String,
    pub location_city: Option<String>,
    pub location_state: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Creation time (ISO 8601 format)
    pub created_at: String,
}

impl From<&Submission> for SubmissionResponse {
    fn from(submission: &Submission) -> Self {
        Self {
            id: submission.id.clone(),
            name: submission.name.clone(),
            description: submission.description.clone(),
            photo_url: submission.photo_url.clone(),
            location_city: submission.location_city.clone(),
            location_state: submission.location_state.clone(),
            latitude: submission.coordinates.map(|c| c.latitude),
            longitude: submission.coordinates.map(|c| c.longitude),
            created_at: submission.created_at.to_rfc3339(),
        }
    }
}

/// Best-effort place name for a coordinate pair
#[derive(Object, Debug, Default)]
pub struct ReverseLocationResponse {
    /// City, town or village; empty when unknown
    pub city: String,
    /// State; empty when unknown
    pub state: String,
}
