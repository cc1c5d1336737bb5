//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file. Secrets such as LLM API keys come
//! from the environment (or a `.env` file) and never from the file itself.
//!
//! # Example
//!
//! ```no_run
//! use learnhub::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::auth::AuthConfig;
use super::database::DatabaseConfig;
use super::llm::LlmConfig;
use super::logging::LoggingConfig;
use crate::adapter::inbound::http::ServerConfig;
use crate::application::tutor::config::TutorConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Every section has defaults, so an empty file is a valid configuration.
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener and CORS settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// SQLite file and pool size.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Session lifetimes and password rules.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Optional LLM backing for the tutor.
    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub tutor: TutorConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails (e.g., port 0 or a temperature above 2)
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// Reads `.env` first so API keys placed there are visible to the LLM
    /// factory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let _ = dotenvy::dotenv();
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are present and values are within
    /// acceptable ranges.
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.logging.validate()?;
        self.auth.validate()?;
        self.llm.validate()?;
        self.tutor.validate()?;
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::infrastructure::config::llm::LlmProvider;
    use crate::infrastructure::config::logging::LogFormat;

    fn invalid_field(toml: &str) -> &'static str {
        match Config::parse_toml(toml) {
            Err(Error::Config(ConfigError::InvalidValue { field, .. })) => field,
            Err(Error::Config(ConfigError::MissingField { field })) => field,
            other => panic!("expected a field error, got {other:?}"),
        }
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.server.cors_origins.is_empty());
        assert_eq!(config.database.path, "learnhub.db");
        assert_eq!(config.database.pool_size, 8);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.auth.session_ttl_hours, 24);
        assert!(!config.llm.enabled);
        assert_eq!(config.tutor.history_window, 6);
    }

    #[test]
    fn sections_override_defaults() {
        let config = Config::parse_toml(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            cors_origins = ["http://localhost:5173"]

            [database]
            path = "/var/lib/learnhub/app.db"

            [logging]
            level = "debug"
            format = "json"

            [llm]
            enabled = true
            provider = "anthropic"

            [llm.anthropic]
            temperature = 0.2
            "#,
        )
        .unwrap();

        assert_eq!(config.server.bind_addr(), "0.0.0.0:9000");
        assert_eq!(config.database.path, "/var/lib/learnhub/app.db");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.llm.provider, LlmProvider::Anthropic);
        let (model, temperature, _) = config.llm.active();
        assert_eq!(model, "claude-3-5-haiku-latest");
        assert_eq!(temperature, 0.2);
    }

    #[test]
    fn rejects_bad_values_by_field() {
        assert_eq!(invalid_field("[server]\nport = 0"), "server.port");
        assert_eq!(invalid_field("[server]\nhost = \"\""), "server.host");
        assert_eq!(invalid_field("[auth]\nsession_ttl_hours = 0"), "auth.session_ttl_hours");
        assert_eq!(invalid_field("[auth]\nmin_password_length = 5"), "auth.min_password_length");
        assert_eq!(invalid_field("[llm.openai]\ntemperature = 2.5"), "llm.temperature");
        assert_eq!(invalid_field("[llm.openai]\nmax_tokens = 0"), "llm.max_tokens");
        assert_eq!(invalid_field("[tutor]\nhistory_window = 51"), "tutor.history_window");
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        assert!(matches!(
            Config::parse_toml("[server\nport = 1"),
            Err(Error::Config(ConfigError::Parse(_)))
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        assert!(matches!(
            Config::load("/nonexistent/learnhub.toml"),
            Err(Error::Config(ConfigError::ReadFile(_)))
        ));
    }
}
