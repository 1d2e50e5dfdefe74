//! Configuration module for evtix-server.
//!
//! Handles loading configuration from the TOML file, CLI overrides and
//! environment variables.

pub mod file;
pub mod runtime;

use crate::config::file::FileConfig;
use crate::config::runtime::{AuthConfig, BookingConfig, ServerConfig, SharedConfig};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("DATABASE_URL environment variable not set")]
    MissingDatabaseUrl,
}

/// Loaded configuration result containing all parts.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub booking: BookingConfig,
}

impl LoadedConfig {
    /// Convert into a SharedConfig with one store per section.
    pub fn into_shared(self) -> SharedConfig {
        SharedConfig::new(self.server, self.auth, self.booking)
    }

    /// Replace every section of `shared` with this configuration.
    pub async fn apply_to(self, shared: &SharedConfig) {
        shared.server.update(self.server).await;
        shared.auth.update(self.auth).await;
        shared.booking.update(self.booking).await;
    }
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    listen_override: Option<SocketAddr>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, listen_override: Option<SocketAddr>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
        }
    }

    /// Read the TOML file, apply CLI overrides and validate.
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        Self::parse(&config_content, self.listen_override)
    }

    /// Reload the configuration (used during SIGHUP).
    pub fn reload(&self) -> Result<LoadedConfig, ConfigError> {
        self.load()
    }

    fn parse(content: &str, listen_override: Option<SocketAddr>) -> Result<LoadedConfig, ConfigError> {
        let mut file_config: FileConfig = toml::from_str(content)?;

        if let Some(listen) = listen_override {
            file_config.server.listen = listen;
        }

        Self::validate(&file_config)?;
        Ok(Self::build_loaded_config(file_config))
    }

    fn validate(config: &FileConfig) -> Result<(), ConfigError> {
        if config.auth.token_secret.is_empty() {
            return Err(ConfigError::ValidationError(
                "auth.token_secret must not be empty".to_string(),
            ));
        }
        if config.auth.token_ttl_secs <= 0 {
            return Err(ConfigError::ValidationError(
                "auth.token_ttl_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    fn build_loaded_config(file_config: FileConfig) -> LoadedConfig {
        LoadedConfig {
            server: ServerConfig {
                listen: file_config.server.listen,
                allowed_origins: file_config.server.allowed_origins,
            },
            auth: AuthConfig::new(
                file_config.auth.token_secret.into_bytes().into_boxed_slice(),
                file_config.auth.token_ttl_secs,
            ),
            booking: BookingConfig {
                confirmation: file_config.booking.confirmation,
            },
        }
    }
}

/// Get the database URL from the environment.
pub fn get_database_url() -> Result<String, ConfigError> {
    std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)
}
