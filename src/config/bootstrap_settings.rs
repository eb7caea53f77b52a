use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::config_spec::ConfigSpec;
use crate::config::errors::ApplicationError;
use crate::config::EnvironmentProvider;

/// Setup key accepted by `POST /setup-admin` when `ADMIN_SETUP_KEY` is unset
pub const DEFAULT_ADMIN_SETUP_KEY: &str = "INITIAL_ADMIN_SETUP_2024";

/// Startup settings for the server and the local backend
pub struct BootstrapSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    storage_root: PathBuf,
    public_base_url: String,
    admin_setup_key: String,
    geocoder_url: String,
}

impl BootstrapSettings {
    /// Load bootstrap settings through the given environment provider
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, ApplicationError> {
        let database_url = ConfigSpec::new(env_provider.clone())
            .env_override("DATABASE_URL")
            .default_value("sqlite://versoforms.db?mode=rwc")
            .min_length(1)
            .load_setting_with_source()?
            .value;

        let server_host = ConfigSpec::new(env_provider.clone())
            .env_override("HOST")
            .default_value("0.0.0.0")
            .validator(ConfigSpec::validate_host_address)
            .load_setting_with_source()?
            .value;

        let port_value = ConfigSpec::new(env_provider.clone())
            .env_override("PORT")
            .default_value("3000")
            .validator(|value| ConfigSpec::validate_port_range(value, 1, 65535))
            .load_setting_with_source()?
            .value;
        let server_port = ConfigSpec::parse_port(&port_value, "PORT")?;

        let storage_root = ConfigSpec::new(env_provider.clone())
            .env_override("STORAGE_ROOT")
            .default_value("./storage")
            .min_length(1)
            .load_setting_with_source()?
            .value;

        let public_base_url = ConfigSpec::new(env_provider.clone())
            .env_override("PUBLIC_BASE_URL")
            .default_value("http://localhost:3000")
            .validator(ConfigSpec::validate_base_url)
            .load_setting_with_source()?
            .value;

        let admin_setup_key = ConfigSpec::new(env_provider.clone())
            .env_override("ADMIN_SETUP_KEY")
            .default_value(DEFAULT_ADMIN_SETUP_KEY)
            .min_length(1)
            .load_setting_with_source()?
            .value;

        let geocoder_url = ConfigSpec::new(env_provider)
            .env_override("GEOCODER_URL")
            .default_value("https://nominatim.openstreetmap.org")
            .validator(ConfigSpec::validate_base_url)
            .load_setting_with_source()?
            .value;

        Ok(Self {
            database_url,
            server_host,
            server_port,
            storage_root: PathBuf::from(storage_root),
            public_base_url,
            admin_setup_key,
            geocoder_url,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ApplicationError> {
        use crate::config::SystemEnvironment;
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Directory holding one subdirectory per storage bucket
    pub fn storage_root(&self) -> &std::path::Path {
        &self.storage_root
    }

    /// Prefix of public object URLs, without trailing slash
    pub fn public_base_url(&self) -> &str {
        &self.public_base_url
    }

    pub fn admin_setup_key(&self) -> &str {
        &self.admin_setup_key
    }

    pub fn geocoder_url(&self) -> &str {
        &self.geocoder_url
    }
}

impl fmt::Debug for BootstrapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("storage_root", &self.storage_root)
            .field("public_base_url", &self.public_base_url)
            .field("admin_setup_key", &"<redacted>")
            .field("geocoder_url", &self.geocoder_url)
            .finish()
    }
}
