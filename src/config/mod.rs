// Configuration layer - settings, secrets, logging and database setup
mod bootstrap_settings;
mod config_spec;
mod database;
mod env_provider;
pub mod errors;
mod logging;
mod secret_manager;

pub use bootstrap_settings::{BootstrapSettings, DEFAULT_ADMIN_SETUP_KEY};
pub use config_spec::{ConfigSpec, ConfigValue, ConfigValueSource};
pub use database::{init_database, migrate_database};
#[cfg(test)]
pub use env_provider::MockEnvironment;
pub use env_provider::{EnvironmentProvider, SystemEnvironment};
pub use errors::ApplicationError;
pub use logging::{init_logging, LoggingConfig, LoggingError};
pub use secret_manager::{SecretConfig, SecretError, SecretManager};
