// Test utilities shared across unit tests
// Only compiled when running tests

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};
use tempfile::TempDir;

use crate::backend::local::LocalBackendConfig;
use crate::backend::{BackendClient, ObjectStorage, TableStore, SUBMISSIONS_BUCKET};
use crate::errors::InternalError;
use crate::services::{Address, GeocodingError, Geolocation, GeolocationError, ReverseGeocoder, TokenService};
use crate::types::internal::{Coordinates, NewSubmission, RoleInsert, Submission};

pub const TEST_SETUP_KEY: &str = "test-setup-key";
pub const TEST_PEPPER: &str = "test-pepper-for-unit-tests";
pub const TEST_JWT_SECRET: &str = "test-secret-key-minimum-32-characters-long";
pub const TEST_REFRESH_SECRET: &str = "test-refresh-secret-minimum-32-chars";
pub const TEST_PUBLIC_BASE_URL: &str = "http://localhost:3000";

/// In-memory SQLite with all migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub fn test_token_service() -> Arc<TokenService> {
    Arc::new(TokenService::new(
        TEST_JWT_SECRET.to_string(),
        TEST_REFRESH_SECRET.to_string(),
    ))
}

/// Local backend over an in-memory database and a temporary storage directory
///
/// Keep the value alive for the duration of the test; dropping it removes
/// the storage directory.
pub struct TestBackend {
    pub db: DatabaseConnection,
    pub client: BackendClient,
    pub storage_dir: TempDir,
}

impl TestBackend {
    pub async fn new() -> Self {
        let db = setup_test_db().await;
        let storage_dir = tempfile::tempdir().expect("Failed to create storage dir");

        let client = BackendClient::local(
            db.clone(),
            test_token_service(),
            LocalBackendConfig {
                password_pepper: TEST_PEPPER.to_string(),
                storage_root: storage_dir.path().to_path_buf(),
                public_base_url: TEST_PUBLIC_BASE_URL.to_string(),
            },
        );

        Self {
            db,
            client,
            storage_dir,
        }
    }

    pub fn bucket_dir(&self) -> PathBuf {
        self.storage_dir.path().join(SUBMISSIONS_BUCKET)
    }

    /// Keys of the objects in the submissions bucket, sorted
    pub fn stored_objects(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(self.bucket_dir()) else {
            return Vec::new();
        };

        let mut keys: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        keys.sort();
        keys
    }
}

/// Object storage whose uploads always fail
pub struct FailingStorage;

#[async_trait]
impl ObjectStorage for FailingStorage {
    async fn upload(&self, _bucket: &str, _key: &str, _bytes: Vec<u8>, _content_type: &str) -> Result<(), InternalError> {
        Err(InternalError::storage(
            "upload_object",
            std::io::Error::other("object storage unavailable"),
        ))
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/storage/{}/{}", TEST_PUBLIC_BASE_URL, bucket, key)
    }
}

/// Table store whose every call fails
pub struct FailingTables;

fn table_error(operation: &str) -> InternalError {
    InternalError::database(operation, DbErr::Custom("table store unavailable".to_string()))
}

#[async_trait]
impl TableStore for FailingTables {
    async fn insert_submission(&self, _submission: NewSubmission) -> Result<Submission, InternalError> {
        Err(table_error("insert_submission"))
    }

    async fn list_submissions(&self) -> Result<Vec<Submission>, InternalError> {
        Err(table_error("list_submissions"))
    }

    async fn get_submission(&self, _id: &str) -> Result<Option<Submission>, InternalError> {
        Err(table_error("get_submission"))
    }

    async fn find_role(&self, _user_id: &str, _role: &str) -> Result<bool, InternalError> {
        Err(table_error("find_role"))
    }

    async fn insert_role_if_absent(&self, _user_id: &str, _role: &str) -> Result<RoleInsert, InternalError> {
        Err(table_error("insert_role"))
    }
}

/// Geolocation double
pub enum FakeGeolocation {
    Unsupported,
    Denied,
    At(Coordinates),
}

#[async_trait]
impl Geolocation for FakeGeolocation {
    fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        match self {
            Self::At(coordinates) => Ok(*coordinates),
            Self::Denied => Err(GeolocationError::PermissionDenied),
            Self::Unsupported => Err(GeolocationError::Unavailable("unsupported".to_string())),
        }
    }
}

/// Reverse geocoder double
pub enum FakeGeocoder {
    Found(Address),
    NoAddress,
    Failing,
}

#[async_trait]
impl ReverseGeocoder for FakeGeocoder {
    async fn reverse(&self, _latitude: f64, _longitude: f64) -> Result<Option<Address>, GeocodingError> {
        match self {
            Self::Found(address) => Ok(Some(address.clone())),
            Self::NoAddress => Ok(None),
            Self::Failing => Err(GeocodingError::NetworkError("connection refused".to_string())),
        }
    }
}
