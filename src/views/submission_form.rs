use crate::coordinators::SubmissionCoordinator;
use crate::errors::SubmitError;
use crate::services::{submission_validator, Geolocation, ReverseGeocoder};
use crate::types::internal::{AcceptedPhoto, Coordinates, Submission, SubmissionDraft, ValidatedSubmission};
use crate::views::Notification;

const SUBMIT_FALLBACK: &str = "Failed to submit. Please try again.";
const NOTIFY_FALLBACK: &str = "Please try again later.";
const ENTER_MANUALLY: &str = "Please enter your location manually.";

/// Lifecycle of one submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

/// Headless state of the public submission form
#[derive(Debug, Default)]
pub struct SubmissionForm {
    draft: SubmissionDraft,
    status: FormStatus,
    error_message: String,
    is_locating: bool,
    notifications: Vec<Notification>,
}

impl SubmissionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub fn set_location_city(&mut self, city: impl Into<String>) {
        self.draft.location_city = city.into();
    }

    pub fn set_location_state(&mut self, state: impl Into<String>) {
        self.draft.location_state = state.into();
    }

    pub fn set_coordinates(&mut self, coordinates: Option<Coordinates>) {
        self.draft.coordinates = coordinates;
    }

    /// Attach a photo if it passes the type and size checks
    ///
    /// A rejected file raises a notification and leaves the current photo in place.
    pub fn select_photo(&mut self, file_name: &str, content_type: &str, bytes: Vec<u8>) -> bool {
        match submission_validator::accept_photo(file_name, content_type, bytes) {
            Ok(photo) => {
                self.draft.photo = Some(photo);
                true
            }
            Err(err) => {
                let title = err.photo_rejection_title().unwrap_or("Invalid file");
                self.notify(Notification::destructive(title, err.to_string()));
                false
            }
        }
    }

    pub fn draft(&self) -> &SubmissionDraft {
        &self.draft
    }

    pub fn photo(&self) -> Option<&AcceptedPhoto> {
        self.draft.photo.as_ref()
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// Inline message shown under the form; empty when there is none
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn is_locating(&self) -> bool {
        self.is_locating
    }

    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    /// Drain pending notifications
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Validate and move to `Submitting`
    ///
    /// Rejected with `InFlight` while a previous attempt is still running.
    pub fn begin_submit(&mut self) -> Result<ValidatedSubmission, SubmitError> {
        if self.is_submitting() {
            return Err(SubmitError::InFlight);
        }

        self.status = FormStatus::Idle;
        self.error_message.clear();

        match submission_validator::validate(&self.draft) {
            Ok(validated) => {
                self.status = FormStatus::Submitting;
                Ok(validated)
            }
            Err(err) => {
                self.status = FormStatus::Error;
                self.error_message = err.to_string();
                Err(SubmitError::Validation(err))
            }
        }
    }

    /// Apply the outcome of the backend calls started by `begin_submit`
    pub fn complete(&mut self, result: Result<Submission, SubmitError>) -> Result<Submission, SubmitError> {
        match result {
            Ok(submission) => {
                self.draft = SubmissionDraft::default();
                self.status = FormStatus::Success;
                self.notify(Notification::info(
                    "Submission successful!",
                    "Your entry has been submitted for review.",
                ));
                Ok(submission)
            }
            Err(err) => {
                let message = err.to_string();
                let message = message.trim();
                tracing::error!("Submission error: {}", err);

                self.status = FormStatus::Error;
                self.error_message = if message.is_empty() {
                    SUBMIT_FALLBACK.to_string()
                } else {
                    message.to_string()
                };
                let description = if message.is_empty() { NOTIFY_FALLBACK } else { message };
                self.notify(Notification::destructive("Submission failed", description));
                Err(err)
            }
        }
    }

    /// Validate, upload, insert, and update the form state
    pub async fn submit(&mut self, coordinator: &SubmissionCoordinator) -> Result<Submission, SubmitError> {
        let validated = self.begin_submit()?;
        let result = coordinator.submit(validated).await;
        self.complete(result)
    }

    /// Fill coordinates from the device, then city/state best effort
    ///
    /// Geocoding failures are logged and otherwise ignored.
    pub async fn detect_location(
        &mut self,
        geolocation: &dyn Geolocation,
        geocoder: &dyn ReverseGeocoder,
    ) -> Option<Coordinates> {
        if !geolocation.is_supported() {
            self.notify(Notification::destructive("Geolocation not supported", ENTER_MANUALLY));
            return None;
        }

        self.is_locating = true;

        let coordinates = match geolocation.current_position().await {
            Ok(coordinates) => coordinates,
            Err(err) => {
                tracing::debug!("Geolocation failed: {}", err);
                self.is_locating = false;
                self.notify(Notification::destructive("Location access denied", ENTER_MANUALLY));
                return None;
            }
        };

        self.draft.coordinates = Some(coordinates);

        match geocoder.reverse(coordinates.latitude, coordinates.longitude).await {
            Ok(Some(address)) => {
                self.draft.location_city = address.city;
                self.draft.location_state = address.state;
            }
            Ok(None) => {}
            Err(err) => tracing::debug!("Reverse geocoding failed, using coordinates only: {}", err),
        }

        self.is_locating = false;
        self.notify(Notification::info(
            "Location captured",
            "Your location has been detected automatically.",
        ));

        Some(coordinates)
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}
