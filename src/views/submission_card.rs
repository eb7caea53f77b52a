use crate::types::internal::Submission;

/// Dashboard tile for one submission
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub photo_url: String,
    pub location_text: Option<String>,
    /// e.g. "Mar 4, 2025"
    pub submitted_on: String,
}

impl From<&Submission> for SubmissionCard {
    fn from(submission: &Submission) -> Self {
        Self {
            id: submission.id.clone(),
            name: submission.name.clone(),
            description: submission.description.clone(),
            photo_url: submission.photo_url.clone(),
            location_text: submission.location_text(),
            submitted_on: submission.created_at.format("%b %-d, %Y").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_card_short_date_and_location() {
        let submission = Submission {
            id: "id-1".to_string(),
            name: "Jane Doe".to_string(),
            description: "A test entry".to_string(),
            photo_url: "http://localhost:3000/storage/submissions/a.jpg".to_string(),
            location_city: Some("Austin".to_string()),
            location_state: Some("Texas".to_string()),
            coordinates: None,
            created_at: Utc.with_ymd_and_hms(2025, 3, 4, 15, 7, 0).unwrap(),
        };

        let card = SubmissionCard::from(&submission);

        assert_eq!(card.submitted_on, "Mar 4, 2025");
        assert_eq!(card.location_text.as_deref(), Some("Austin, Texas"));
    }
}
