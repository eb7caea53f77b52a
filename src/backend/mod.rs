// Backend layer - the hosted-backend seam and its local implementation
pub mod local;
pub mod storage;

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::InternalError;
use crate::types::internal::{Account, AuthSession, NewSubmission, RoleInsert, Submission};

pub use local::{LocalAuth, LocalTables};
pub use storage::LocalObjectStorage;

/// Bucket holding submission photos
pub const SUBMISSIONS_BUCKET: &str = "submissions";

/// Account management and session handling
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn list_users(&self) -> Result<Vec<Account>, InternalError>;

    async fn create_user(&self, email: &str, password: &str, email_confirmed: bool)
        -> Result<Account, InternalError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, InternalError>;

    /// Exchange a refresh token for a new access token
    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, InternalError>;

    /// Resolve the account behind a live access token
    async fn get_user(&self, access_token: &str) -> Result<Account, InternalError>;

    /// End the session the access token belongs to
    async fn sign_out(&self, access_token: &str) -> Result<(), InternalError>;
}

/// Public object storage
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(&self, bucket: &str, key: &str, bytes: Vec<u8>, content_type: &str)
        -> Result<(), InternalError>;

    /// URL under which an uploaded object is publicly readable
    fn public_url(&self, bucket: &str, key: &str) -> String;
}

/// Row access for submissions and role grants
#[async_trait]
pub trait TableStore: Send + Sync {
    async fn insert_submission(&self, submission: NewSubmission) -> Result<Submission, InternalError>;

    /// All submissions ordered by `created_at` descending
    async fn list_submissions(&self) -> Result<Vec<Submission>, InternalError>;

    async fn get_submission(&self, id: &str) -> Result<Option<Submission>, InternalError>;

    async fn find_role(&self, user_id: &str, role: &str) -> Result<bool, InternalError>;

    async fn insert_role_if_absent(&self, user_id: &str, role: &str) -> Result<RoleInsert, InternalError>;
}

/// Handle to the three backend services, built once at startup
#[derive(Clone)]
pub struct BackendClient {
    pub auth: Arc<dyn AuthBackend>,
    pub storage: Arc<dyn ObjectStorage>,
    pub tables: Arc<dyn TableStore>,
}

impl BackendClient {
    pub fn new(
        auth: Arc<dyn AuthBackend>,
        storage: Arc<dyn ObjectStorage>,
        tables: Arc<dyn TableStore>,
    ) -> Self {
        Self { auth, storage, tables }
    }
}
