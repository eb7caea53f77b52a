use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::errors::{AccountError, InternalError};
use crate::types::db::session::{self, ActiveModel, Entity as Sessions};

/// Sign-in sessions keyed by the hash of their refresh token
pub struct SessionStore {
    db: DatabaseConnection,
}

impl SessionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Store a new session and return its id
    ///
    /// # Arguments
    /// * `user_id` - The account the session belongs to
    /// * `refresh_token_hash` - HMAC-SHA256 of the refresh token
    /// * `expires_at` - Unix timestamp when the refresh token expires
    pub async fn create_session(
        &self,
        user_id: &str,
        refresh_token_hash: String,
        expires_at: i64,
    ) -> Result<String, InternalError> {
        let session_id = Uuid::new_v4().to_string();

        ActiveModel {
            id: Set(session_id.clone()),
            user_id: Set(user_id.to_string()),
            refresh_token_hash: Set(refresh_token_hash),
            expires_at: Set(expires_at),
            created_at: Set(Utc::now().timestamp()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("create_session", e))?;

        Ok(session_id)
    }

    /// Look up a live session by refresh token hash
    ///
    /// Expired sessions are deleted on sight.
    pub async fn find_by_refresh_hash(&self, refresh_token_hash: &str) -> Result<session::Model, InternalError> {
        let session = Sessions::find()
            .filter(session::Column::RefreshTokenHash.eq(refresh_token_hash))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_session_by_refresh_hash", e))?
            .ok_or_else(|| AccountError::invalid_token("refresh_token", "not found"))?;

        if session.expires_at < Utc::now().timestamp() {
            self.delete_session(&session.id).await?;
            return Err(AccountError::ExpiredToken("refresh_token".to_string()).into());
        }

        Ok(session)
    }

    /// Whether a session exists and has not expired
    pub async fn is_live(&self, session_id: &str) -> Result<bool, InternalError> {
        let session = Sessions::find_by_id(session_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_session", e))?;

        Ok(session.is_some_and(|s| s.expires_at >= Utc::now().timestamp()))
    }

    /// Delete a session; returns whether one was removed
    pub async fn delete_session(&self, session_id: &str) -> Result<bool, InternalError> {
        let result = Sessions::delete_by_id(session_id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_session", e))?;

        Ok(result.rows_affected > 0)
    }
}
