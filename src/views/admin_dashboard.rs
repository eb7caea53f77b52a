use crate::backend::BackendClient;
use crate::errors::InternalError;
use crate::services::search;
use crate::types::internal::Submission;
use crate::views::{SubmissionCard, SubmissionDetail};

/// What to show when the filtered list is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    NoSubmissions,
    NoMatches,
}

impl EmptyState {
    pub fn title(&self) -> &'static str {
        match self {
            Self::NoSubmissions => "No submissions yet",
            Self::NoMatches => "No matching submissions",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Self::NoSubmissions => "Submissions will appear here once users submit their entries",
            Self::NoMatches => "Try adjusting your search query",
        }
    }

    /// Only a search can be cleared
    pub fn offers_clear_search(&self) -> bool {
        matches!(self, Self::NoMatches)
    }
}

/// Headless state of the admin dashboard
///
/// Holds the full submission set in memory; search never goes back to the
/// table store.
pub struct AdminDashboard {
    backend: BackendClient,
    access_token: String,
    submissions: Vec<Submission>,
    query: String,
    is_loading: bool,
    load_error: Option<String>,
    selected: Option<Submission>,
    detail_open: bool,
    signed_out: bool,
}

impl AdminDashboard {
    pub fn new(backend: BackendClient, access_token: impl Into<String>) -> Self {
        Self {
            backend,
            access_token: access_token.into(),
            submissions: Vec::new(),
            query: String::new(),
            is_loading: false,
            load_error: None,
            selected: None,
            detail_open: false,
            signed_out: false,
        }
    }

    /// Fetch every submission, newest first
    ///
    /// On failure the previously loaded list stays and the error is kept
    /// for display.
    pub async fn load(&mut self) {
        self.is_loading = true;

        match self.backend.tables.list_submissions().await {
            Ok(submissions) => {
                tracing::debug!("Loaded {} submissions", submissions.len());
                self.submissions = submissions;
                self.load_error = None;
            }
            Err(err) => {
                tracing::error!("Error fetching submissions: {}", err);
                self.load_error = Some("Failed to load submissions".to_string());
            }
        }

        self.is_loading = false;
    }

    pub async fn refresh(&mut self) {
        self.load().await;
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn clear_search(&mut self) {
        self.query.clear();
    }

    pub fn total(&self) -> usize {
        self.submissions.len()
    }

    /// Submissions matching the current query, in load order
    pub fn filtered(&self) -> Vec<&Submission> {
        search::filter_submissions(&self.submissions, &self.query)
    }

    pub fn cards(&self) -> Vec<SubmissionCard> {
        self.filtered().into_iter().map(SubmissionCard::from).collect()
    }

    pub fn summary(&self) -> String {
        format!(
            "Showing {} of {} submissions",
            self.filtered().len(),
            self.total()
        )
    }

    /// `None` while loading or when at least one card is shown
    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.is_loading || !self.filtered().is_empty() {
            return None;
        }

        if self.query.is_empty() {
            Some(EmptyState::NoSubmissions)
        } else {
            Some(EmptyState::NoMatches)
        }
    }

    /// Open the detail view for a loaded submission
    pub fn select(&mut self, id: &str) -> bool {
        match self.submissions.iter().find(|s| s.id == id) {
            Some(submission) => {
                self.selected = Some(submission.clone());
                self.detail_open = true;
                true
            }
            None => false,
        }
    }

    /// Close the detail view; the last selection is retained
    pub fn close_detail(&mut self) {
        self.detail_open = false;
    }

    pub fn selected(&self) -> Option<&Submission> {
        self.selected.as_ref()
    }

    pub fn detail(&self) -> Option<SubmissionDetail> {
        SubmissionDetail::render(self.selected.as_ref(), self.detail_open)
    }

    /// End the admin session
    ///
    /// The dashboard counts as signed out even when the backend call fails.
    pub async fn sign_out(&mut self) -> Result<(), InternalError> {
        let result = self.backend.auth.sign_out(&self.access_token).await;
        if let Err(err) = &result {
            tracing::warn!("Sign-out failed: {}", err);
        }
        self.signed_out = true;
        result
    }

    pub fn is_signed_out(&self) -> bool {
        self.signed_out
    }
}
