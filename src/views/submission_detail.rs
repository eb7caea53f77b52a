use crate::types::internal::Submission;

pub const NO_LOCATION: &str = "No location provided";

/// Read-only presentation of one submission
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionDetail {
    pub id: String,
    pub name: String,
    pub description: String,
    pub photo_url: String,
    /// "City, State" of the present parts
    pub location_badge: Option<String>,
    /// "lat, lon" with six decimals; zero is a valid coordinate
    pub coordinates_badge: Option<String>,
    /// Set only when neither badge is
    pub location_fallback: Option<String>,
    /// "Submitted on March 4, 2025 at 3:07 PM", in UTC
    pub submitted_on: String,
}

impl SubmissionDetail {
    /// Nothing is rendered while the view is closed or has no record
    pub fn render(submission: Option<&Submission>, open: bool) -> Option<Self> {
        if !open {
            return None;
        }
        submission.map(Self::from)
    }
}

impl From<&Submission> for SubmissionDetail {
    fn from(submission: &Submission) -> Self {
        let location_badge = submission.location_text();
        let coordinates_badge = submission
            .coordinates
            .map(|c| format!("{:.6}, {:.6}", c.latitude, c.longitude));
        let location_fallback = match (&location_badge, &coordinates_badge) {
            (None, None) => Some(NO_LOCATION.to_string()),
            _ => None,
        };

        Self {
            id: submission.id.clone(),
            name: submission.name.clone(),
            description: submission.description.clone(),
            photo_url: submission.photo_url.clone(),
            location_badge,
            coordinates_badge,
            location_fallback,
            submitted_on: format!(
                "Submitted on {}",
                submission.created_at.format("%B %-d, %Y at %-I:%M %p")
            ),
        }
    }
}
