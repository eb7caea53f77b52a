use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi, Tags,
};

use crate::api::auth::BearerAuth;
use crate::api::helpers::require_admin;
use crate::backend::BackendClient;
use crate::errors::AdminError;
use crate::services::search;
use crate::types::dto::admin::{SubmissionCardResponse, SubmissionDetailResponse, SubmissionListResponse};
use crate::types::dto::submission::SubmissionResponse;
use crate::views::{SubmissionCard, SubmissionDetail};

/// Admin dashboard endpoints
pub struct AdminApi {
    backend: BackendClient,
}

impl AdminApi {
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }
}

/// API tags for admin endpoints
#[derive(Tags)]
enum AdminTags {
    /// Admin dashboard
    Admin,
}

#[OpenApi(prefix_path = "/admin")]
impl AdminApi {
    /// List submissions, newest first, optionally filtered by `q`
    #[oai(path = "/submissions", method = "get", tag = "AdminTags::Admin")]
    async fn list_submissions(
        &self,
        auth: BearerAuth,
        q: Query<Option<String>>,
    ) -> Result<Json<SubmissionListResponse>, AdminError> {
        require_admin(&self.backend, &auth.0.token).await?;

        let submissions = self
            .backend
            .tables
            .list_submissions()
            .await
            .map_err(AdminError::fetch_failed)?;

        let query = q.0.unwrap_or_default();
        let filtered = search::filter_submissions(&submissions, &query);
        let shown = filtered.len();
        let total = submissions.len();

        let cards: Vec<SubmissionCardResponse> = filtered
            .into_iter()
            .map(|s| SubmissionCardResponse::from(SubmissionCard::from(s)))
            .collect();

        Ok(Json(SubmissionListResponse {
            submissions: cards,
            shown: shown as u32,
            total: total as u32,
            summary: format!("Showing {} of {} submissions", shown, total),
        }))
    }

    /// Detail view of one submission
    #[oai(path = "/submissions/:id", method = "get", tag = "AdminTags::Admin")]
    async fn get_submission(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<SubmissionDetailResponse>, AdminError> {
        require_admin(&self.backend, &auth.0.token).await?;

        let submission = self
            .backend
            .tables
            .get_submission(&id.0)
            .await
            .map_err(AdminError::fetch_failed)?
            .ok_or_else(|| AdminError::submission_not_found(&id.0))?;

        Ok(Json(SubmissionDetailResponse::new(
            SubmissionDetail::from(&submission),
            SubmissionResponse::from(&submission),
        )))
    }
}
