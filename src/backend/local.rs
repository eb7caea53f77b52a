use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::backend::{AuthBackend, BackendClient, LocalObjectStorage, TableStore};
use crate::errors::{AccountError, InternalError};
use crate::services::TokenService;
use crate::stores::{AccountStore, RoleStore, SessionStore, SubmissionStore};
use crate::types::internal::{Account, AuthSession, NewSubmission, RoleInsert, Submission};

/// Auth backend over the `accounts` and `sessions` tables
pub struct LocalAuth {
    accounts: AccountStore,
    sessions: SessionStore,
    tokens: Arc<TokenService>,
}

impl LocalAuth {
    pub fn new(db: DatabaseConnection, password_pepper: String, tokens: Arc<TokenService>) -> Self {
        Self {
            accounts: AccountStore::new(db.clone(), password_pepper),
            sessions: SessionStore::new(db),
            tokens,
        }
    }

    fn session_for(&self, account: Account, session_id: &str, refresh_token: String) -> Result<AuthSession, InternalError> {
        let access_token = self.tokens.generate_jwt(&account.id, session_id)?;

        Ok(AuthSession {
            access_token,
            refresh_token,
            expires_in: self.tokens.jwt_expiration_seconds(),
            account,
        })
    }
}

#[async_trait]
impl AuthBackend for LocalAuth {
    async fn list_users(&self) -> Result<Vec<Account>, InternalError> {
        self.accounts.list_accounts().await
    }

    async fn create_user(&self, email: &str, password: &str, email_confirmed: bool) -> Result<Account, InternalError> {
        self.accounts.create_account(email, password, email_confirmed).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, InternalError> {
        let account = self.accounts.verify_credentials(email, password).await?;

        let refresh_token = self.tokens.generate_refresh_token();
        let session_id = self
            .sessions
            .create_session(
                &account.id,
                self.tokens.hash_refresh_token(&refresh_token),
                self.tokens.get_refresh_expiration(),
            )
            .await?;

        tracing::info!("Account {} signed in", account.id);

        self.session_for(account, &session_id, refresh_token)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, InternalError> {
        let session = self
            .sessions
            .find_by_refresh_hash(&self.tokens.hash_refresh_token(refresh_token))
            .await?;
        let account = self.accounts.get_account(&session.user_id).await?;

        self.session_for(account, &session.id, refresh_token.to_string())
    }

    async fn get_user(&self, access_token: &str) -> Result<Account, InternalError> {
        let claims = self.tokens.validate_jwt(access_token)?;

        if !self.sessions.is_live(&claims.sid).await? {
            return Err(AccountError::SessionNotFound.into());
        }

        self.accounts.get_account(&claims.sub).await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), InternalError> {
        let claims = self.tokens.validate_jwt(access_token)?;

        if self.sessions.delete_session(&claims.sid).await? {
            tracing::info!("Account {} signed out", claims.sub);
        }

        Ok(())
    }
}

/// Table store over the `submissions` and `user_roles` tables
pub struct LocalTables {
    submissions: SubmissionStore,
    roles: RoleStore,
}

impl LocalTables {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            submissions: SubmissionStore::new(db.clone()),
            roles: RoleStore::new(db),
        }
    }
}

#[async_trait]
impl TableStore for LocalTables {
    async fn insert_submission(&self, submission: NewSubmission) -> Result<Submission, InternalError> {
        self.submissions.insert(submission).await
    }

    async fn list_submissions(&self) -> Result<Vec<Submission>, InternalError> {
        self.submissions.list().await
    }

    async fn get_submission(&self, id: &str) -> Result<Option<Submission>, InternalError> {
        self.submissions.get(id).await
    }

    async fn find_role(&self, user_id: &str, role: &str) -> Result<bool, InternalError> {
        self.roles.has_role(user_id, role).await
    }

    async fn insert_role_if_absent(&self, user_id: &str, role: &str) -> Result<RoleInsert, InternalError> {
        self.roles.insert_role_if_absent(user_id, role).await
    }
}

/// Inputs for assembling the local backend
pub struct LocalBackendConfig {
    pub password_pepper: String,
    pub storage_root: PathBuf,
    pub public_base_url: String,
}

impl BackendClient {
    /// Backend client over one database connection and a storage directory
    pub fn local(db: DatabaseConnection, tokens: Arc<TokenService>, config: LocalBackendConfig) -> Self {
        Self::new(
            Arc::new(LocalAuth::new(db.clone(), config.password_pepper, tokens)),
            Arc::new(LocalObjectStorage::new(config.storage_root, config.public_base_url)),
            Arc::new(LocalTables::new(db)),
        )
    }
}
