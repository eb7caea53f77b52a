use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::{AccountError, InternalError};
use crate::services::crypto;
use crate::types::db::account::{self, ActiveModel, Entity as Accounts};
use crate::types::internal::Account;

/// Accounts and their password hashes
pub struct AccountStore {
    db: DatabaseConnection,
    password_pepper: String,
}

/// Emails are compared case-insensitively and stored lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

impl AccountStore {
    /// Create a new AccountStore
    ///
    /// # Arguments
    /// * `db` - The database connection
    /// * `password_pepper` - The secret key used for password hashing (from SecretManager)
    pub fn new(db: DatabaseConnection, password_pepper: String) -> Self {
        Self { db, password_pepper }
    }

    /// All accounts, oldest first
    pub async fn list_accounts(&self) -> Result<Vec<Account>, InternalError> {
        let accounts = Accounts::find()
            .order_by_asc(account::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_accounts", e))?;

        Ok(accounts.into_iter().map(Account::from).collect())
    }

    pub async fn get_account(&self, user_id: &str) -> Result<Account, InternalError> {
        Accounts::find_by_id(user_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_account", e))?
            .map(Account::from)
            .ok_or_else(|| AccountError::UserNotFound(user_id.to_string()).into())
    }

    /// Create an account with a peppered Argon2id password hash
    ///
    /// # Returns
    /// * `Ok(Account)` - The created account
    /// * `Err(InternalError)` - `AccountError::DuplicateEmail` if the email is taken
    pub async fn create_account(
        &self,
        email: &str,
        password: &str,
        email_confirmed: bool,
    ) -> Result<Account, InternalError> {
        let email = normalize_email(email);

        if !is_plausible_email(&email) {
            return Err(AccountError::InvalidInput(format!("Invalid email address: {}", email)).into());
        }
        if password.is_empty() {
            return Err(AccountError::InvalidInput("Password is required".to_string()).into());
        }

        let existing = Accounts::find()
            .filter(account::Column::Email.eq(&email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_account_by_email", e))?;

        if existing.is_some() {
            return Err(AccountError::DuplicateEmail(email).into());
        }

        let password_hash = crypto::hash_password(&self.password_pepper, password)?;
        let now = Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            email: Set(email.clone()),
            password_hash: Set(password_hash),
            email_confirmed: Set(email_confirmed),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            // A concurrent create can still win between the check and the insert
            if e.to_string().contains("UNIQUE") {
                InternalError::from(AccountError::DuplicateEmail(email.clone()))
            } else {
                InternalError::database("create_account", e)
            }
        })?;

        tracing::info!("Created account {}", model.id);

        Ok(Account::from(model))
    }

    /// Verify email and password
    ///
    /// Unknown email and wrong password both return `InvalidCredentials`.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<Account, InternalError> {
        let model = Accounts::find()
            .filter(account::Column::Email.eq(normalize_email(email)))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_account_by_email", e))?
            .ok_or(AccountError::InvalidCredentials)?;

        if !crypto::verify_password(&self.password_pepper, password, &model.password_hash)? {
            return Err(AccountError::InvalidCredentials.into());
        }

        Ok(Account::from(model))
    }
}
