// Common test utilities for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use poem::test::TestClient;
use poem::Route;
use sea_orm::DbErr;
use tempfile::TempDir;
use versoforms_backend::api::build_routes;
use versoforms_backend::app_data::AppData;
use versoforms_backend::backend::{BackendClient, TableStore};
use versoforms_backend::errors::InternalError;
use versoforms_backend::types::internal::{NewSubmission, RoleInsert, Submission};
use versoforms_backend::config::{
    init_database, migrate_database, BootstrapSettings, EnvironmentProvider, SecretManager,
};

pub const SETUP_KEY: &str = "integration-setup-key";

/// Text carried by every `UnavailableTables` error
pub const TABLE_FAILURE_DETAIL: &str = "SQLITE_FULL: database or disk is full (/var/lib/versoforms/app.db)";

/// Table store whose every call fails
pub struct UnavailableTables;

fn table_failure(operation: &str) -> InternalError {
    InternalError::database(operation, DbErr::Custom(TABLE_FAILURE_DETAIL.to_string()))
}

#[async_trait]
impl TableStore for UnavailableTables {
    async fn insert_submission(&self, _submission: NewSubmission) -> Result<Submission, InternalError> {
        Err(table_failure("insert_submission"))
    }

    async fn list_submissions(&self) -> Result<Vec<Submission>, InternalError> {
        Err(table_failure("list_submissions"))
    }

    async fn get_submission(&self, _id: &str) -> Result<Option<Submission>, InternalError> {
        Err(table_failure("get_submission"))
    }

    async fn find_role(&self, _user_id: &str, _role: &str) -> Result<bool, InternalError> {
        Err(table_failure("find_role"))
    }

    async fn insert_role_if_absent(&self, _user_id: &str, _role: &str) -> Result<RoleInsert, InternalError> {
        Err(table_failure("insert_role"))
    }
}

/// Fixed environment for one test app
pub struct StaticEnvironment {
    vars: HashMap<String, String>,
}

impl StaticEnvironment {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            vars: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl EnvironmentProvider for StaticEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Full application over an in-memory database and a temporary storage root
pub struct TestApp {
    pub app_data: AppData,
    pub client: TestClient<Route>,
    pub storage_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let storage_dir = tempfile::tempdir().expect("Failed to create storage dir");
        let storage_root = storage_dir.path().to_string_lossy().to_string();

        let env: Arc<dyn EnvironmentProvider + Send + Sync> = Arc::new(StaticEnvironment::new(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("STORAGE_ROOT", &storage_root),
            ("PUBLIC_BASE_URL", "http://localhost:3000"),
            ("ADMIN_SETUP_KEY", SETUP_KEY),
            ("JWT_SECRET", "integration-jwt-secret-at-least-32-chars"),
            ("PASSWORD_PEPPER", "integration-pepper-16"),
            ("REFRESH_TOKEN_SECRET", "integration-refresh-secret-32-characters"),
        ]));

        let settings = BootstrapSettings::from_env_provider(env.clone()).expect("Failed to load settings");
        let secrets = SecretManager::from_env_provider(env).expect("Failed to load secrets");

        let db = init_database(&settings).await.expect("Failed to connect to database");
        migrate_database(&db).await.expect("Failed to run migrations");

        let app_data = AppData::init(settings, &secrets, db).expect("Failed to build app data");
        Self::from_app_data(app_data, storage_dir)
    }

    /// Same app, but every table call fails with a database error
    pub async fn with_unavailable_tables() -> Self {
        let healthy = Self::new().await;
        let backend = BackendClient::new(
            healthy.app_data.backend.auth.clone(),
            healthy.app_data.backend.storage.clone(),
            Arc::new(UnavailableTables),
        );
        let app_data = AppData::new(
            healthy.app_data.settings.clone(),
            healthy.app_data.token_service.clone(),
            backend,
            healthy.app_data.geocoder.clone(),
        );

        Self::from_app_data(app_data, healthy.storage_dir)
    }

    fn from_app_data(app_data: AppData, storage_dir: TempDir) -> Self {
        let client = TestClient::new(build_routes(&app_data));

        Self {
            app_data,
            client,
            storage_dir,
        }
    }

    /// Bootstrap an admin and sign in, returning the access token
    pub async fn admin_token(&self, email: &str, password: &str) -> String {
        self.app_data
            .setup_coordinator
            .ensure_admin(email, password)
            .await
            .expect("Failed to set up admin");

        self.app_data
            .backend
            .auth
            .sign_in(email, password)
            .await
            .expect("Failed to sign in")
            .access_token
    }
}
