use std::path::Path;

use billing_service::BillingSettings;
use config_engine::{ConfigEngine, ConfigError, ConfigSource, Validate};
use logger_redacted::LoggerConfig;
use serde::Deserialize;

/// Environment variable prefix: `HBILL__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "HBILL";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggerConfig,
    pub billing: BillingSettings,
}

impl Validate for AppConfig {
    fn validate(&self) -> config_engine::Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError("server.host must not be empty".to_string()));
        }
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError("server.port must not be 0".to_string()));
        }
        self.billing
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

impl AppConfig {
    /// Layer the config file (optional unless explicitly required) under
    /// `HBILL__*` environment variables.
    ///
    /// # Errors
    ///
    /// Propagates source, parse and validation failures.
    pub fn load(path: &Path, required: bool) -> config_engine::Result<Self> {
        let file = if required {
            ConfigSource::file(path)
        } else {
            ConfigSource::optional_file(path)
        };
        ConfigEngine::new()
            .add_source(file)
            .add_source(ConfigSource::env(ENV_PREFIX))
            .load()
    }
}
