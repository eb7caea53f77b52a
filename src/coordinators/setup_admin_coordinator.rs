use crate::backend::BackendClient;
use crate::errors::{AccountError, InternalError, SetupAdminError};
use crate::services::crypto;
use crate::stores::account_store::normalize_email;
use crate::types::internal::{Account, RoleInsert, ADMIN_ROLE};

/// What the bootstrap routine did
#[derive(Debug, Clone, PartialEq)]
pub enum SetupAdminOutcome {
    /// A new pre-confirmed account was created and granted the admin role
    Created { user_id: String },
    /// The account already existed; its admin role is now present
    Ensured { user_id: String, role: RoleInsert },
}

impl SetupAdminOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Created { .. } => "Admin user created successfully",
            Self::Ensured { .. } => "Admin role ensured for existing user",
        }
    }

    pub fn user_id(&self) -> &str {
        match self {
            Self::Created { user_id } | Self::Ensured { user_id, .. } => user_id,
        }
    }
}

/// Idempotent admin provisioning
pub struct SetupAdminCoordinator {
    backend: BackendClient,
    setup_key: String,
}

impl SetupAdminCoordinator {
    pub fn new(backend: BackendClient, setup_key: String) -> Self {
        Self { backend, setup_key }
    }

    /// Check the setup key, then ensure the admin account and role
    ///
    /// A wrong key returns before any backend call.
    pub async fn setup_admin(
        &self,
        email: &str,
        password: &str,
        setup_key: &str,
    ) -> Result<SetupAdminOutcome, SetupAdminError> {
        self.verify_setup_key(Some(setup_key))?;
        self.ensure_admin(email, password).await
    }

    /// A missing key is treated like a wrong one
    pub fn verify_setup_key(&self, setup_key: Option<&str>) -> Result<(), SetupAdminError> {
        match setup_key {
            Some(given) if crypto::secrets_match(&self.setup_key, given) => Ok(()),
            _ => {
                tracing::warn!("Rejected admin setup attempt with invalid setup key");
                Err(SetupAdminError::InvalidSetupKey)
            }
        }
    }

    /// Find or create the account, then make sure it holds the admin role
    ///
    /// Running this twice with the same email yields one account and one role row.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<SetupAdminOutcome, SetupAdminError> {
        if let Some(account) = self.find_account(email).await? {
            return self.ensure_role(account).await;
        }

        let created = match self.backend.auth.create_user(email, password, true).await {
            Ok(account) => account,
            Err(InternalError::Account(AccountError::DuplicateEmail(_))) => {
                // Lost a race with a concurrent bootstrap for the same email
                return match self.find_account(email).await? {
                    Some(account) => self.ensure_role(account).await,
                    None => Err(SetupAdminError::backend(
                        "create_user",
                        "Failed to create user",
                        AccountError::UserNotFound(email.to_string()).into(),
                    )),
                };
            }
            Err(e) => return Err(SetupAdminError::backend("create_user", "Failed to create user", e)),
        };

        self.backend
            .tables
            .insert_role_if_absent(&created.id, ADMIN_ROLE)
            .await
            .map_err(|e| SetupAdminError::backend("assign_role", "Failed to assign admin role", e))?;

        tracing::info!("Created admin account {}", created.id);

        Ok(SetupAdminOutcome::Created { user_id: created.id })
    }

    async fn find_account(&self, email: &str) -> Result<Option<Account>, SetupAdminError> {
        let wanted = normalize_email(email);

        let accounts = self
            .backend
            .auth
            .list_users()
            .await
            .map_err(|e| SetupAdminError::backend("list_users", "Failed to list users", e))?;

        Ok(accounts.into_iter().find(|account| normalize_email(&account.email) == wanted))
    }

    async fn ensure_role(&self, account: Account) -> Result<SetupAdminOutcome, SetupAdminError> {
        let has_role = self
            .backend
            .tables
            .find_role(&account.id, ADMIN_ROLE)
            .await
            .map_err(|e| SetupAdminError::backend("check_role", "Failed to check user role", e))?;

        let role = if has_role {
            RoleInsert::AlreadyPresent
        } else {
            self.backend
                .tables
                .insert_role_if_absent(&account.id, ADMIN_ROLE)
                .await
                .map_err(|e| SetupAdminError::backend("assign_role", "Failed to assign admin role", e))?
        };

        tracing::info!("Admin role ensured for account {} ({:?})", account.id, role);

        Ok(SetupAdminOutcome::Ensured {
            user_id: account.id,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{FailingTables, TestBackend, TEST_SETUP_KEY};
    use std::sync::Arc;

    fn coordinator(client: BackendClient) -> SetupAdminCoordinator {
        SetupAdminCoordinator::new(client, TEST_SETUP_KEY.to_string())
    }

    #[tokio::test]
    async fn test_wrong_key_creates_nothing() {
        let test_backend = TestBackend::new().await;

        let err = coordinator(test_backend.client.clone())
            .setup_admin("admin@example.com", "s3cret-pass", "wrong-key")
            .await
            .unwrap_err();

        assert!(matches!(err, SetupAdminError::InvalidSetupKey));
        assert!(test_backend.client.auth.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_key_check_rejects_near_misses() {
        let test_backend = TestBackend::new().await;
        let setup = coordinator(test_backend.client.clone());
        let prefix = &TEST_SETUP_KEY[..TEST_SETUP_KEY.len() - 1];
        let extended = format!("{}x", TEST_SETUP_KEY);

        assert!(setup.verify_setup_key(Some(TEST_SETUP_KEY)).is_ok());
        assert!(matches!(setup.verify_setup_key(None), Err(SetupAdminError::InvalidSetupKey)));
        assert!(matches!(setup.verify_setup_key(Some("")), Err(SetupAdminError::InvalidSetupKey)));
        assert!(matches!(setup.verify_setup_key(Some(prefix)), Err(SetupAdminError::InvalidSetupKey)));
        assert!(matches!(
            setup.verify_setup_key(Some(&extended)),
            Err(SetupAdminError::InvalidSetupKey)
        ));
    }

    #[tokio::test]
    async fn test_creates_account_and_role() {
        let test_backend = TestBackend::new().await;

        let outcome = coordinator(test_backend.client.clone())
            .setup_admin("admin@example.com", "s3cret-pass", TEST_SETUP_KEY)
            .await
            .unwrap();

        let SetupAdminOutcome::Created { user_id } = &outcome else {
            panic!("expected Created, got {:?}", outcome);
        };
        assert_eq!(outcome.message(), "Admin user created successfully");
        assert!(test_backend.client.tables.find_role(user_id, ADMIN_ROLE).await.unwrap());

        let accounts = test_backend.client.auth.list_users().await.unwrap();
        assert_eq!(accounts.len(), 1);
        assert!(accounts[0].email_confirmed);
    }

    #[tokio::test]
    async fn test_second_run_only_confirms() {
        let test_backend = TestBackend::new().await;
        let setup = coordinator(test_backend.client.clone());

        let first = setup.setup_admin("admin@example.com", "s3cret-pass", TEST_SETUP_KEY).await.unwrap();
        let second = setup.setup_admin("Admin@Example.com", "other-pass", TEST_SETUP_KEY).await.unwrap();

        assert_eq!(
            second,
            SetupAdminOutcome::Ensured {
                user_id: first.user_id().to_string(),
                role: RoleInsert::AlreadyPresent,
            }
        );
        assert_eq!(second.message(), "Admin role ensured for existing user");
        assert_eq!(test_backend.client.auth.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_existing_account_without_role_gets_one() {
        let test_backend = TestBackend::new().await;
        let existing = test_backend
            .client
            .auth
            .create_user("reviewer@example.com", "s3cret-pass", false)
            .await
            .unwrap();

        let outcome = coordinator(test_backend.client.clone())
            .ensure_admin("reviewer@example.com", "ignored")
            .await
            .unwrap();

        assert_eq!(
            outcome,
            SetupAdminOutcome::Ensured {
                user_id: existing.id.clone(),
                role: RoleInsert::Inserted,
            }
        );
        assert!(test_backend.client.tables.find_role(&existing.id, ADMIN_ROLE).await.unwrap());
    }

    #[tokio::test]
    async fn test_role_check_failure_uses_backend_message() {
        let test_backend = TestBackend::new().await;
        test_backend
            .client
            .auth
            .create_user("admin@example.com", "s3cret-pass", true)
            .await
            .unwrap();
        let mut client = test_backend.client.clone();
        client.tables = Arc::new(FailingTables);

        let err = coordinator(client)
            .ensure_admin("admin@example.com", "s3cret-pass")
            .await
            .unwrap_err();

        match err {
            SetupAdminError::Backend { step, message, .. } => {
                assert_eq!(step, "check_role");
                assert!(message.contains("table store unavailable"));
            }
            other => panic!("expected Backend error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_email_is_a_backend_error() {
        let test_backend = TestBackend::new().await;

        let err = coordinator(test_backend.client.clone())
            .ensure_admin("not-an-email", "s3cret-pass")
            .await
            .unwrap_err();

        assert!(matches!(err, SetupAdminError::Backend { step: "create_user", .. }));
    }
}
