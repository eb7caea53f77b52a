use std::sync::Arc;

use poem_openapi::{
    param::Query,
    payload::Json,
    ApiResponse, OpenApi, Tags,
};

use crate::coordinators::SubmissionCoordinator;
use crate::errors::SubmissionError;
use crate::services::{submission_validator, ReverseGeocoder};
use crate::types::dto::submission::{ReverseLocationResponse, SubmissionFormData, SubmissionResponse};
use crate::types::internal::SubmissionDraft;

/// Public submission intake
pub struct SubmissionApi {
    coordinator: Arc<SubmissionCoordinator>,
    geocoder: Arc<dyn ReverseGeocoder>,
}

impl SubmissionApi {
    pub fn new(coordinator: Arc<SubmissionCoordinator>, geocoder: Arc<dyn ReverseGeocoder>) -> Self {
        Self { coordinator, geocoder }
    }
}

#[derive(ApiResponse)]
enum CreateSubmissionResponse {
    /// Submission stored
    #[oai(status = 201)]
    Created(Json<SubmissionResponse>),
}

/// API tags for submission endpoints
#[derive(Tags)]
enum SubmissionTags {
    /// Public submission form
    Submissions,
}

#[OpenApi]
impl SubmissionApi {
    /// Submit a new entry with a photo
    ///
    /// The photo is checked first, then the text fields, then the photo is
    /// uploaded and the row is inserted.
    #[oai(path = "/submissions", method = "post", tag = "SubmissionTags::Submissions")]
    async fn create(&self, form: SubmissionFormData) -> Result<CreateSubmissionResponse, SubmissionError> {
        let photo = match form.photo {
            Some(upload) => {
                let file_name = upload.file_name().unwrap_or_default().to_string();
                let content_type = upload.content_type().unwrap_or_default().to_string();
                // Upload is spooled to a temp file; reject on its size before reading it in
                submission_validator::check_photo(&content_type, upload.size())
                    .map_err(SubmissionError::from_validation_error)?;
                let bytes = upload.into_vec().await.map_err(|e| {
                    tracing::error!("Failed to read uploaded photo: {}", e);
                    SubmissionError::internal_server_error()
                })?;

                Some(
                    submission_validator::accept_photo(file_name, content_type, bytes)
                        .map_err(SubmissionError::from_validation_error)?,
                )
            }
            None => None,
        };

        let coordinates = submission_validator::pair_coordinates(form.latitude, form.longitude)
            .map_err(SubmissionError::from_validation_error)?;

        let draft = SubmissionDraft {
            name: form.name.unwrap_or_default(),
            description: form.description.unwrap_or_default(),
            location_city: form.location_city.unwrap_or_default(),
            location_state: form.location_state.unwrap_or_default(),
            coordinates,
            photo,
        };

        let validated = submission_validator::validate(&draft).map_err(SubmissionError::from_validation_error)?;

        let submission = self
            .coordinator
            .submit(validated)
            .await
            .map_err(SubmissionError::from_submit_error)?;

        Ok(CreateSubmissionResponse::Created(Json(SubmissionResponse::from(&submission))))
    }

    /// Best-effort city and state for a coordinate pair
    ///
    /// Lookup failures answer with empty fields; the form falls back to
    /// manual entry.
    #[oai(path = "/submissions/location/reverse", method = "get", tag = "SubmissionTags::Submissions")]
    async fn reverse_location(&self, lat: Query<f64>, lon: Query<f64>) -> Json<ReverseLocationResponse> {
        match self.geocoder.reverse(lat.0, lon.0).await {
            Ok(Some(address)) => Json(ReverseLocationResponse {
                city: address.city,
                state: address.state,
            }),
            Ok(None) => Json(ReverseLocationResponse::default()),
            Err(e) => {
                tracing::debug!("Reverse geocoding failed for ({}, {}): {}", lat.0, lon.0, e);
                Json(ReverseLocationResponse::default())
            }
        }
    }
}
