use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::backend::local::LocalBackendConfig;
use crate::backend::BackendClient;
use crate::config::{BootstrapSettings, SecretManager};
use crate::coordinators::{SetupAdminCoordinator, SubmissionCoordinator};
use crate::errors::InternalError;
use crate::services::{NominatimGeocoder, ReverseGeocoder, TokenService};

/// Everything the HTTP layer and CLI share, created once in main.rs
///
/// ```text
/// main.rs
///   ↓
/// AppData::init(settings, secrets, db)
///   ├─ token_service (Arc<TokenService>)
///   ├─ backend (BackendClient: auth, storage, tables)
///   ├─ geocoder (Arc<dyn ReverseGeocoder>)
///   ├─ submission_coordinator
///   └─ setup_coordinator
/// ```
pub struct AppData {
    pub settings: Arc<BootstrapSettings>,
    pub token_service: Arc<TokenService>,
    pub backend: BackendClient,
    pub geocoder: Arc<dyn ReverseGeocoder>,
    pub submission_coordinator: Arc<SubmissionCoordinator>,
    pub setup_coordinator: Arc<SetupAdminCoordinator>,
}

impl AppData {
    /// Build the local backend and every service on top of it
    ///
    /// The database should be migrated before calling this.
    ///
    /// # Errors
    ///
    /// Returns `InternalError` when the geocoding client cannot be built
    pub fn init(
        settings: BootstrapSettings,
        secrets: &SecretManager,
        db: DatabaseConnection,
    ) -> Result<Self, InternalError> {
        tracing::info!("Initializing AppData...");

        let token_service = Arc::new(TokenService::new(
            secrets.jwt_secret().to_string(),
            secrets.refresh_token_secret().to_string(),
        ));

        let backend = BackendClient::local(
            db,
            token_service.clone(),
            LocalBackendConfig {
                password_pepper: secrets.pepper().to_string(),
                storage_root: settings.storage_root().to_path_buf(),
                public_base_url: settings.public_base_url().to_string(),
            },
        );

        let geocoder = NominatimGeocoder::new(settings.geocoder_url())
            .map_err(|e| InternalError::parse("geocoder", e.to_string()))?;

        let app_data = Self::new(Arc::new(settings), token_service, backend, Arc::new(geocoder));

        tracing::info!("AppData initialization complete");

        Ok(app_data)
    }

    /// Assemble from already-built parts
    pub fn new(
        settings: Arc<BootstrapSettings>,
        token_service: Arc<TokenService>,
        backend: BackendClient,
        geocoder: Arc<dyn ReverseGeocoder>,
    ) -> Self {
        let submission_coordinator = Arc::new(SubmissionCoordinator::new(backend.clone()));
        let setup_coordinator = Arc::new(SetupAdminCoordinator::new(
            backend.clone(),
            settings.admin_setup_key().to_string(),
        ));

        Self {
            settings,
            token_service,
            backend,
            geocoder,
            submission_coordinator,
            setup_coordinator,
        }
    }
}
