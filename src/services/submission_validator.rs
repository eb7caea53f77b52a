use crate::errors::ValidationError;
use crate::types::internal::{
    AcceptedPhoto, Coordinates, SubmissionDraft, ValidatedSubmission,
};

/// Largest accepted photo, inclusive
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// MIME types accepted at photo selection; `image/jpg` is non-standard but seen in the wild
pub const ACCEPTED_PHOTO_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/jpg"];

pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_DESCRIPTION_CHARS: usize = 2000;

/// Check a selected file and wrap it as an `AcceptedPhoto`
///
/// The type check runs before the size check.
pub fn accept_photo(
    file_name: impl Into<String>,
    content_type: impl Into<String>,
    bytes: Vec<u8>,
) -> Result<AcceptedPhoto, ValidationError> {
    let content_type = check_photo(&content_type.into(), bytes.len())?;
    Ok(AcceptedPhoto::new(file_name.into(), content_type, bytes))
}

/// Type and size rules on their own, for callers that know the size before
/// reading the file; returns the normalized MIME type
pub fn check_photo(content_type: &str, size: usize) -> Result<String, ValidationError> {
    let content_type = content_type.trim().to_ascii_lowercase();

    if !ACCEPTED_PHOTO_TYPES.contains(&content_type.as_str()) {
        return Err(ValidationError::UnsupportedPhotoType(content_type));
    }

    if size > MAX_PHOTO_BYTES {
        return Err(ValidationError::PhotoTooLarge(size));
    }

    Ok(content_type)
}

/// Apply the submit-time rules in order; the first failure wins
///
/// Lengths are counted in characters of the trimmed value.
pub fn validate(draft: &SubmissionDraft) -> Result<ValidatedSubmission, ValidationError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(ValidationError::NameTooLong);
    }

    let description = draft.description.trim();
    if description.is_empty() {
        return Err(ValidationError::DescriptionRequired);
    }
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(ValidationError::DescriptionTooLong);
    }

    let photo = draft.photo.clone().ok_or(ValidationError::PhotoRequired)?;

    Ok(ValidatedSubmission {
        name: name.to_string(),
        description: description.to_string(),
        location_city: non_empty(&draft.location_city),
        location_state: non_empty(&draft.location_state),
        coordinates: draft.coordinates,
        photo,
    })
}

/// Pair up latitude and longitude received as separate fields
pub fn pair_coordinates(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Option<Coordinates>, ValidationError> {
    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Ok(Some(Coordinates::new(latitude, longitude))),
        (None, None) => Ok(None),
        _ => Err(ValidationError::IncompleteCoordinates),
    }
}

/// Extension for the stored object name
///
/// Derived from the accepted MIME type only; the client's file name never
/// decides how the object is served.
pub fn photo_extension(photo: &AcceptedPhoto) -> &'static str {
    match photo.content_type() {
        "image/png" => "png",
        _ => "jpg",
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jpeg(size: usize) -> AcceptedPhoto {
        accept_photo("photo.jpg", "image/jpeg", vec![0u8; size]).unwrap()
    }

    fn draft(name: &str, description: &str) -> SubmissionDraft {
        SubmissionDraft {
            name: name.to_string(),
            description: description.to_string(),
            photo: Some(jpeg(16)),
            ..Default::default()
        }
    }

    #[test]
    fn test_accepts_jpeg_png_and_jpg() {
        assert!(accept_photo("a.jpg", "image/jpeg", vec![1]).is_ok());
        assert!(accept_photo("a.png", "image/png", vec![1]).is_ok());
        assert!(accept_photo("a.jpg", "image/jpg", vec![1]).is_ok());
    }

    #[test]
    fn test_rejects_other_types() {
        let err = accept_photo("a.gif", "image/gif", vec![1]).unwrap_err();

        assert_eq!(err, ValidationError::UnsupportedPhotoType("image/gif".to_string()));
        assert_eq!(err.photo_rejection_title(), Some("Invalid file type"));
        assert!(accept_photo("a.webp", "image/webp", vec![1]).is_err());
        assert!(accept_photo("a.pdf", "application/pdf", vec![1]).is_err());
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert!(accept_photo("a.jpg", "image/jpeg", vec![0u8; MAX_PHOTO_BYTES]).is_ok());

        let err = accept_photo("a.jpg", "image/jpeg", vec![0u8; MAX_PHOTO_BYTES + 1]).unwrap_err();
        assert_eq!(err, ValidationError::PhotoTooLarge(MAX_PHOTO_BYTES + 1));
        assert_eq!(err.to_string(), "Please upload an image smaller than 5MB.");
    }

    #[test]
    fn test_type_checked_before_size() {
        let err = accept_photo("a.gif", "image/gif", vec![0u8; MAX_PHOTO_BYTES + 1]).unwrap_err();

        assert!(matches!(err, ValidationError::UnsupportedPhotoType(_)));
    }

    #[test]
    fn test_check_photo_uses_declared_size() {
        assert_eq!(check_photo(" Image/PNG ", MAX_PHOTO_BYTES).unwrap(), "image/png");
        assert_eq!(
            check_photo("image/jpeg", 50 * 1024 * 1024).unwrap_err(),
            ValidationError::PhotoTooLarge(50 * 1024 * 1024)
        );
        assert!(matches!(
            check_photo("text/html", 50 * 1024 * 1024).unwrap_err(),
            ValidationError::UnsupportedPhotoType(_)
        ));
    }

    #[test]
    fn test_validation_order() {
        assert_eq!(validate(&draft("   ", "")).unwrap_err(), ValidationError::NameRequired);
        assert_eq!(
            validate(&draft(&"n".repeat(101), "")).unwrap_err(),
            ValidationError::NameTooLong
        );
        assert_eq!(validate(&draft("Jane", " \n")).unwrap_err(), ValidationError::DescriptionRequired);
        assert_eq!(
            validate(&draft("Jane", &"d".repeat(2001))).unwrap_err(),
            ValidationError::DescriptionTooLong
        );

        let mut no_photo = draft("Jane", "Entry");
        no_photo.photo = None;
        assert_eq!(validate(&no_photo).unwrap_err(), ValidationError::PhotoRequired);
    }

    #[test]
    fn test_bounds_are_inclusive_on_trimmed_chars() {
        let name = format!("  {}  ", "é".repeat(100));
        let description = "d".repeat(2000);

        let validated = validate(&draft(&name, &description)).unwrap();

        assert_eq!(validated.name.chars().count(), 100);
        assert_eq!(validated.description.len(), 2000);
    }

    #[test]
    fn test_trims_and_normalizes_location() {
        let mut input = draft("  Jane Doe ", " A test entry ");
        input.location_city = "  Austin ".to_string();
        input.location_state = "   ".to_string();

        let validated = validate(&input).unwrap();

        assert_eq!(validated.name, "Jane Doe");
        assert_eq!(validated.description, "A test entry");
        assert_eq!(validated.location_city.as_deref(), Some("Austin"));
        assert_eq!(validated.location_state, None);
    }

    #[test]
    fn test_pair_coordinates() {
        assert_eq!(pair_coordinates(None, None), Ok(None));
        assert_eq!(
            pair_coordinates(Some(0.0), Some(0.0)),
            Ok(Some(Coordinates::new(0.0, 0.0)))
        );
        assert_eq!(
            pair_coordinates(Some(1.0), None),
            Err(ValidationError::IncompleteCoordinates)
        );
    }

    #[test]
    fn test_photo_extension() {
        let named = accept_photo("Holiday.JPEG", "image/jpeg", vec![1]).unwrap();
        let bare_png = accept_photo("scan", "image/png", vec![1]).unwrap();
        let bare_jpg = accept_photo("camera-upload.", "image/jpg", vec![1]).unwrap();

        assert_eq!(photo_extension(&named), "jpg");
        assert_eq!(photo_extension(&bare_png), "png");
        assert_eq!(photo_extension(&bare_jpg), "jpg");
    }

    #[test]
    fn test_extension_ignores_file_name() {
        let html = accept_photo("evil.html", "image/png", b"<script>".to_vec()).unwrap();
        let script = accept_photo("payload.js", "image/jpeg", vec![1]).unwrap();

        assert_eq!(photo_extension(&html), "png");
        assert_eq!(photo_extension(&script), "jpg");
    }
}
