use chrono::{DateTime, TimeZone, Utc};

use crate::types::db::submission;

/// Latitude/longitude pair; both are present or the pair is absent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Combine two nullable columns into an optional pair
    ///
    /// A row with only one of the two set is treated as having no coordinates.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(Self { latitude, longitude }),
            _ => None,
        }
    }
}

/// A photo that passed the type and size checks at selection time
///
/// Only `submission_validator::accept_photo` constructs this, so a form
/// holding an `AcceptedPhoto` never carries an unsupported file.
#[derive(Clone, PartialEq)]
pub struct AcceptedPhoto {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl AcceptedPhoto {
    pub(crate) fn new(file_name: String, content_type: String, bytes: Vec<u8>) -> Self {
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl std::fmt::Debug for AcceptedPhoto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcceptedPhoto")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Raw form input as typed by the user, before trimming or validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionDraft {
    pub name: String,
    pub description: String,
    pub location_city: String,
    pub location_state: String,
    pub coordinates: Option<Coordinates>,
    pub photo: Option<AcceptedPhoto>,
}

/// Input that passed every submit-time rule, trimmed and normalized
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSubmission {
    pub name: String,
    pub description: String,
    pub location_city: Option<String>,
    pub location_state: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub photo: AcceptedPhoto,
}

/// Row to insert once the photo is stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub name: String,
    pub description: String,
    pub photo_url: String,
    pub location_city: Option<String>,
    pub location_state: Option<String>,
    pub coordinates: Option<Coordinates>,
}

/// A stored submission; immutable after creation
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub id: String,
    pub name: String,
    pub description: String,
    pub photo_url: String,
    pub location_city: Option<String>,
    pub location_state: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub created_at: DateTime<Utc>,
}

impl Submission {
    /// City and state joined with ", ", skipping absent parts
    pub fn location_text(&self) -> Option<String> {
        let parts: Vec<&str> = [self.location_city.as_deref(), self.location_state.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

impl From<submission::Model> for Submission {
    fn from(model: submission::Model) -> Self {
        let created_at = Utc
            .timestamp_millis_opt(model.created_at)
            .single()
            .unwrap_or_default();

        Self {
            coordinates: Coordinates::from_parts(model.latitude, model.longitude),
            id: model.id,
            name: model.name,
            description: model.description,
            photo_url: model.photo_url,
            location_city: model.location_city,
            location_state: model.location_state,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(city: Option<&str>, state: Option<&str>) -> Submission {
        Submission {
            id: "id-1".to_string(),
            name: "Jane Doe".to_string(),
            description: "A test entry".to_string(),
            photo_url: "http://localhost/storage/submissions/a.jpg".to_string(),
            location_city: city.map(str::to_string),
            location_state: state.map(str::to_string),
            coordinates: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_location_text_joins_present_parts() {
        assert_eq!(sample(Some("Austin"), Some("Texas")).location_text().as_deref(), Some("Austin, Texas"));
        assert_eq!(sample(None, Some("Texas")).location_text().as_deref(), Some("Texas"));
        assert_eq!(sample(Some("Austin"), None).location_text().as_deref(), Some("Austin"));
        assert_eq!(sample(None, None).location_text(), None);
    }

    #[test]
    fn test_coordinates_require_both_parts() {
        assert_eq!(Coordinates::from_parts(Some(1.0), Some(2.0)), Some(Coordinates::new(1.0, 2.0)));
        assert_eq!(Coordinates::from_parts(Some(1.0), None), None);
        assert_eq!(Coordinates::from_parts(None, Some(2.0)), None);
    }

    #[test]
    fn test_model_conversion_keeps_zero_coordinates() {
        let model = submission::Model {
            id: "id-2".to_string(),
            name: "Equator".to_string(),
            description: "On the line".to_string(),
            photo_url: "http://localhost/storage/submissions/b.png".to_string(),
            location_city: None,
            location_state: None,
            latitude: Some(0.0),
            longitude: Some(0.0),
            created_at: 1_700_000_000_000,
        };

        let submission = Submission::from(model);

        assert_eq!(submission.coordinates, Some(Coordinates::new(0.0, 0.0)));
        assert_eq!(submission.created_at.timestamp_millis(), 1_700_000_000_000);
    }
}
