use chrono::Utc;

use crate::backend::{BackendClient, SUBMISSIONS_BUCKET};
use crate::errors::SubmitError;
use crate::services::{crypto, submission_validator};
use crate::types::internal::{AcceptedPhoto, NewSubmission, Submission, ValidatedSubmission};

/// Length of the random part of an object key
const KEY_SUFFIX_LEN: usize = 7;

/// Object key `{unix_millis}-{base36 suffix}.{ext}`
pub fn object_key(photo: &AcceptedPhoto, unix_millis: i64) -> String {
    format!(
        "{}-{}.{}",
        unix_millis,
        crypto::random_base36(KEY_SUFFIX_LEN),
        submission_validator::photo_extension(photo)
    )
}

/// Stores a validated submission: upload the photo, then insert the row
pub struct SubmissionCoordinator {
    backend: BackendClient,
}

impl SubmissionCoordinator {
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    /// Upload, resolve the public URL, insert; each step awaited in order
    ///
    /// A failed insert leaves the uploaded object in place.
    pub async fn submit(&self, submission: ValidatedSubmission) -> Result<Submission, SubmitError> {
        let ValidatedSubmission {
            name,
            description,
            location_city,
            location_state,
            coordinates,
            photo,
        } = submission;

        let key = object_key(&photo, Utc::now().timestamp_millis());
        let content_type = photo.content_type().to_string();

        self.backend
            .storage
            .upload(SUBMISSIONS_BUCKET, &key, photo.into_bytes(), &content_type)
            .await
            .map_err(|e| {
                tracing::error!("Photo upload failed for {}: {}", key, e);
                SubmitError::Upload(e)
            })?;

        let photo_url = self.backend.storage.public_url(SUBMISSIONS_BUCKET, &key);

        let new_submission = NewSubmission {
            name,
            description,
            photo_url,
            location_city,
            location_state,
            coordinates,
        };

        match self.backend.tables.insert_submission(new_submission).await {
            Ok(stored) => {
                tracing::info!("Stored submission {}", stored.id);
                Ok(stored)
            }
            Err(source) => {
                tracing::warn!(
                    "Insert failed after upload, object {}/{} is orphaned: {}",
                    SUBMISSIONS_BUCKET,
                    key,
                    source
                );
                Err(SubmitError::Insert {
                    orphaned_object: key,
                    source,
                })
            }
        }
    }
}
