//! Application configuration module
//!
//! Configuration is loaded from environment variables with the `config` and
//! `dotenvy` crates. Variables use the `HUMANCE` prefix and `__` between
//! nested keys.
//!
//! # Example
//!
//! ```no_run
//! use humance::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod feedback;
mod server;

pub use auth::AuthConfig;
pub use database::{DatabaseConfig, StorageBackend};
pub use error::{ConfigError, ValidationError};
pub use feedback::FeedbackConfig;
pub use server::{Environment, LogFormat, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub feedback: FeedbackConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `.env` if present, then every `HUMANCE__*` variable:
    ///
    /// - `HUMANCE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `HUMANCE__DATABASE__BACKEND=postgres` -> `database.backend`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("HUMANCE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration sections
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.feedback.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
