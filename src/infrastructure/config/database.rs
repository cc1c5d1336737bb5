//! Database configuration.

use serde::{Deserialize, Serialize};

use crate::adapter::outbound::sqlite::database::connection::DEFAULT_POOL_SIZE;
use crate::error::ConfigError;

/// `[database]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    ///
    /// Defaults to "learnhub.db" in the current directory.
    #[serde(default = "default_path")]
    pub path: String,

    /// Maximum pooled connections.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            pool_size: default_pool_size(),
        }
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.path",
            });
        }
        if self.pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.pool_size",
                reason: "must be greater than 0".into(),
            });
        }
        Ok(())
    }
}

fn default_path() -> String {
    "learnhub.db".into()
}

const fn default_pool_size() -> u32 {
    DEFAULT_POOL_SIZE
}
