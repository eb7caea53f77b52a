use poem_openapi::{auth::Bearer, payload::Json, OpenApi, SecurityScheme, Tags};

use crate::backend::BackendClient;
use crate::errors::AuthError;
use crate::types::dto::auth::{
    LoginRequest, LogoutResponse, RefreshRequest, RefreshResponse, TokenResponse, WhoAmIResponse,
};
use crate::types::internal::ADMIN_ROLE;

/// Admin sign-in and session endpoints
pub struct AuthApi {
    backend: BackendClient,
}

impl AuthApi {
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }
}

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Sign in with email and password
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<TokenResponse>, AuthError> {
        let session = self.backend.auth.sign_in(&body.email, &body.password).await?;

        Ok(Json(TokenResponse {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: session.expires_in,
        }))
    }

    /// Verify the access token and describe its account
    #[oai(path = "/whoami", method = "get", tag = "AuthTags::Authentication")]
    async fn whoami(&self, auth: BearerAuth) -> Result<Json<WhoAmIResponse>, AuthError> {
        let account = self.backend.auth.get_user(&auth.0.token).await?;
        let is_admin = self.backend.tables.find_role(&account.id, ADMIN_ROLE).await?;

        Ok(Json(WhoAmIResponse {
            user_id: account.id,
            email: account.email,
            is_admin,
        }))
    }

    /// Exchange a refresh token for a new access token
    #[oai(path = "/refresh", method = "post", tag = "AuthTags::Authentication")]
    async fn refresh(&self, body: Json<RefreshRequest>) -> Result<Json<RefreshResponse>, AuthError> {
        let session = self.backend.auth.refresh(&body.refresh_token).await?;

        // The refresh token itself is not rotated
        Ok(Json(RefreshResponse {
            access_token: session.access_token,
            token_type: "Bearer".to_string(),
            expires_in: session.expires_in,
        }))
    }

    /// End the current session
    #[oai(path = "/logout", method = "post", tag = "AuthTags::Authentication")]
    async fn logout(&self, auth: BearerAuth) -> Result<Json<LogoutResponse>, AuthError> {
        self.backend.auth.sign_out(&auth.0.token).await?;

        Ok(Json(LogoutResponse {
            message: "Logged out successfully".to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::TestBackend;

    async fn api_with_admin() -> (TestBackend, AuthApi) {
        let test_backend = TestBackend::new().await;
        let account = test_backend
            .client
            .auth
            .create_user("admin@example.com", "correct-horse", true)
            .await
            .unwrap();
        test_backend
            .client
            .tables
            .insert_role_if_absent(&account.id, ADMIN_ROLE)
            .await
            .unwrap();

        let api = AuthApi::new(test_backend.client.clone());
        (test_backend, api)
    }

    fn bearer(token: &str) -> BearerAuth {
        BearerAuth(Bearer {
            token: token.to_string(),
        })
    }

    fn login_request(email: &str, password: &str) -> Json<LoginRequest> {
        Json(LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    #[tokio::test]
    async fn test_login_then_whoami() {
        let (_backend, api) = api_with_admin().await;

        let tokens = api.login(login_request("Admin@Example.com", "correct-horse")).await.unwrap();
        assert_eq!(tokens.token_type, "Bearer");
        assert_eq!(tokens.expires_in, 900);

        let who = api.whoami(bearer(&tokens.access_token)).await.unwrap();
        assert_eq!(who.email, "admin@example.com");
        assert!(who.is_admin);
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let (_backend, api) = api_with_admin().await;

        let err = api.login(login_request("admin@example.com", "wrong")).await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials(_)));
    }

    #[tokio::test]
    async fn test_refresh_issues_working_token() {
        let (_backend, api) = api_with_admin().await;
        let tokens = api.login(login_request("admin@example.com", "correct-horse")).await.unwrap();

        let refreshed = api
            .refresh(Json(RefreshRequest {
                refresh_token: tokens.refresh_token.clone(),
            }))
            .await
            .unwrap();

        assert!(api.whoami(bearer(&refreshed.access_token)).await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_refresh_token() {
        let (_backend, api) = api_with_admin().await;

        let err = api
            .refresh(Json(RefreshRequest {
                refresh_token: "unknown".to_string(),
            }))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidRefreshToken(_)));
    }

    #[tokio::test]
    async fn test_logout_ends_session() {
        let (_backend, api) = api_with_admin().await;
        let tokens = api.login(login_request("admin@example.com", "correct-horse")).await.unwrap();

        api.logout(bearer(&tokens.access_token)).await.unwrap();

        let err = api.whoami(bearer(&tokens.access_token)).await.unwrap_err();
        assert!(matches!(err, AuthError::SessionEnded(_)));
    }
}
