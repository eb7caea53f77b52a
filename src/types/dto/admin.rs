use poem_openapi::Object;

use crate::types::dto::submission::SubmissionResponse;
use crate::views::{SubmissionCard, SubmissionDetail};

/// Dashboard listing after search filtering
#[derive(Object, Debug)]
pub struct SubmissionListResponse {
    /// Matching submissions, newest first
    pub submissions: Vec<SubmissionCardResponse>,

    /// Number of submissions after filtering
    pub shown: u32,

    /// Number of submissions in the store
    pub total: u32,

    /// "Showing {shown} of {total} submissions"
    pub summary: String,
}

/// One tile of the dashboard grid
#[derive(Object, Debug)]
pub struct SubmissionCardResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub photo_url: String,
    /// "City, State" of the present parts
    pub location_text: Option<String>,
    /// Short date, e.g. "Mar 4, 2025"
    pub submitted_on: String,
}

impl From<SubmissionCard> for SubmissionCardResponse {
    fn from(card: SubmissionCard) -> Self {
        Self {
            id: card.id,
            name: card.name,
            description: card.description,
            photo_url: card.photo_url,
            location_text: card.location_text,
            submitted_on: card.submitted_on,
        }
    }
}

/// Read-only detail of one submission
#[derive(Object, Debug)]
pub struct SubmissionDetailResponse {
    pub submission: SubmissionResponse,
    pub location_badge: Option<String>,
    pub coordinates_badge: Option<String>,
    /// "No location provided" when neither badge applies
    pub location_fallback: Option<String>,
    /// e.g. "Submitted on March 4, 2025 at 3:07 PM"
    pub submitted_on: String,
}

impl SubmissionDetailResponse {
    pub fn new(detail: SubmissionDetail, submission: SubmissionResponse) -> Self {
        Self {
            submission,
            location_badge: detail.location_badge,
            coordinates_badge: detail.coordinates_badge,
            location_fallback: detail.location_fallback,
            submitted_on: detail.submitted_on,
        }
    }
}
