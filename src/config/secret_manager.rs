use std::fmt;
use std::sync::Arc;

use crate::config::{EnvironmentProvider, SystemEnvironment};

/// Custom error type for secret-related failures
#[derive(Debug)]
pub enum SecretError {
    Missing { secret_name: String },
    InvalidLength { secret_name: String, expected: usize, actual: usize },
}

impl SecretError {
    pub fn missing(secret_name: &str) -> Self {
        Self::Missing {
            secret_name: secret_name.to_string(),
        }
    }

    pub fn invalid_length(secret_name: &str, expected: usize, actual: usize) -> Self {
        Self::InvalidLength {
            secret_name: secret_name.to_string(),
            expected,
            actual,
        }
    }
}

impl fmt::Display for SecretError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { secret_name } => {
                write!(f, "Required secret '{}' is missing", secret_name)
            }
            Self::InvalidLength { secret_name, expected, actual } => {
                write!(
                    f,
                    "Secret '{}' must be at least {} characters, got {}",
                    secret_name, expected, actual
                )
            }
        }
    }
}

impl std::error::Error for SecretError {}

/// Rules for one secret read from the environment
pub struct SecretConfig {
    pub name: &'static str,
    pub required: bool,
    pub min_length: Option<usize>,
}

impl SecretConfig {
    pub fn env_var(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            min_length: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }
}

/// Centralized manager for application secrets
pub struct SecretManager {
    jwt_secret: String,
    pepper: String,
    refresh_token_secret: String,
}

impl SecretManager {
    /// Initialize the SecretManager from the process environment
    ///
    /// # Errors
    /// Returns `SecretError` if any required secret is missing or fails validation
    pub fn init() -> Result<Self, SecretError> {
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    /// Load and validate all secrets through the given environment provider
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, SecretError> {
        let jwt_secret = Self::load_secret(env_provider.as_ref(), &Self::jwt_config())?;
        let pepper = Self::load_secret(env_provider.as_ref(), &Self::pepper_config())?;
        let refresh_token_secret =
            Self::load_secret(env_provider.as_ref(), &Self::refresh_token_config())?;

        Ok(Self {
            jwt_secret,
            pepper,
            refresh_token_secret,
        })
    }

    fn jwt_config() -> SecretConfig {
        SecretConfig::env_var("JWT_SECRET").required(true).min_length(32)
    }

    fn pepper_config() -> SecretConfig {
        SecretConfig::env_var("PASSWORD_PEPPER").required(true).min_length(16)
    }

    fn refresh_token_config() -> SecretConfig {
        SecretConfig::env_var("REFRESH_TOKEN_SECRET").required(true).min_length(32)
    }

    /// Get the JWT signing secret
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    /// Get the pepper for password hashing
    pub fn pepper(&self) -> &str {
        &self.pepper
    }

    /// Get the HMAC key for refresh token hashes
    pub fn refresh_token_secret(&self) -> &str {
        &self.refresh_token_secret
    }

    pub(crate) fn load_secret(
        env_provider: &(dyn EnvironmentProvider + Send + Sync),
        config: &SecretConfig,
    ) -> Result<String, SecretError> {
        let value = match env_provider.get_var(config.name) {
            Some(v) => v,
            None if !config.required => return Ok(String::new()),
            None => return Err(SecretError::missing(config.name)),
        };

        if let Some(min_len) = config.min_length {
            if value.len() < min_len {
                return Err(SecretError::invalid_length(config.name, min_len, value.len()));
            }
        }

        Ok(value)
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("jwt_secret", &"<redacted>")
            .field("pepper", &"<redacted>")
            .field("refresh_token_secret", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretManager {{ secrets_loaded: 3 }}")
    }
}
