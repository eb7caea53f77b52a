use crate::backend::BackendClient;
use crate::errors::AdminError;
use crate::types::internal::{Account, ADMIN_ROLE};

/// Resolve the bearer token and require an `admin` role row for its account
///
/// Stands in for the row-level policy of a hosted table store: rows are
/// readable only by authenticated admins.
pub async fn require_admin(backend: &BackendClient, access_token: &str) -> Result<Account, AdminError> {
    let account = backend
        .auth
        .get_user(access_token)
        .await
        .map_err(AdminError::from_internal_error)?;

    let is_admin = backend
        .tables
        .find_role(&account.id, ADMIN_ROLE)
        .await
        .map_err(AdminError::from_internal_error)?;

    if !is_admin {
        tracing::warn!("Account {} attempted admin access without the admin role", account.id);
        return Err(AdminError::admin_required());
    }

    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::TestBackend;

    async fn signed_in(test_backend: &TestBackend, email: &str) -> (String, String) {
        let auth = &test_backend.client.auth;
        let account = auth.create_user(email, "correct-horse", true).await.unwrap();
        let session = auth.sign_in(email, "correct-horse").await.unwrap();
        (account.id, session.access_token)
    }

    #[tokio::test]
    async fn test_admin_role_grants_access() {
        let test_backend = TestBackend::new().await;
        let (user_id, token) = signed_in(&test_backend, "admin@example.com").await;
        test_backend
            .client
            .tables
            .insert_role_if_absent(&user_id, ADMIN_ROLE)
            .await
            .unwrap();

        let account = require_admin(&test_backend.client, &token).await.unwrap();

        assert_eq!(account.id, user_id);
    }

    #[tokio::test]
    async fn test_missing_role_is_forbidden() {
        let test_backend = TestBackend::new().await;
        let (_, token) = signed_in(&test_backend, "visitor@example.com").await;

        let err = require_admin(&test_backend.client, &token).await.unwrap_err();

        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn test_garbage_token_is_unauthenticated() {
        let test_backend = TestBackend::new().await;

        let err = require_admin(&test_backend.client, "not-a-jwt").await.unwrap_err();

        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn test_signed_out_session_is_unauthenticated() {
        let test_backend = TestBackend::new().await;
        let (user_id, token) = signed_in(&test_backend, "admin@example.com").await;
        test_backend
            .client
            .tables
            .insert_role_if_absent(&user_id, ADMIN_ROLE)
            .await
            .unwrap();
        test_backend.client.auth.sign_out(&token).await.unwrap();

        let err = require_admin(&test_backend.client, &token).await.unwrap_err();

        assert_eq!(err.status_code(), 401);
    }
}
