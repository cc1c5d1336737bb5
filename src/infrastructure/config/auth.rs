//! Session and password policy configuration.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::application::auth::AuthPolicy;
use crate::error::ConfigError;

/// Shortest password length an operator may configure.
pub const MIN_PASSWORD_FLOOR: usize = 6;

/// `[auth]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Bearer session lifetime.
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u32,

    /// Password reset token lifetime.
    #[serde(default = "default_reset_ttl_minutes")]
    pub reset_ttl_minutes: u32,

    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_hours: default_session_ttl_hours(),
            reset_ttl_minutes: default_reset_ttl_minutes(),
            min_password_length: default_min_password_length(),
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session_ttl_hours == 0 {
            return Err(ConfigError::InvalidValue {
                field: "auth.session_ttl_hours",
                reason: "must be greater than 0".into(),
            });
        }
        if self.reset_ttl_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "auth.reset_ttl_minutes",
                reason: "must be greater than 0".into(),
            });
        }
        if self.min_password_length < MIN_PASSWORD_FLOOR {
            return Err(ConfigError::InvalidValue {
                field: "auth.min_password_length",
                reason: format!("must be at least {MIN_PASSWORD_FLOOR}"),
            });
        }
        Ok(())
    }

    /// Policy handed to the auth service.
    #[must_use]
    pub fn policy(&self) -> AuthPolicy {
        AuthPolicy {
            session_ttl: Duration::hours(i64::from(self.session_ttl_hours)),
            reset_ttl: Duration::minutes(i64::from(self.reset_ttl_minutes)),
            min_password_length: self.min_password_length,
        }
    }
}

const fn default_session_ttl_hours() -> u32 {
    24
}

const fn default_reset_ttl_minutes() -> u32 {
    30
}

const fn default_min_password_length() -> usize {
    8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_auth_policy() {
        assert_eq!(AuthConfig::default().policy(), AuthPolicy::default());
    }

    #[test]
    fn short_password_floor_rejected() {
        let config = AuthConfig {
            min_password_length: 4,
            ..AuthConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("auth.min_password_length"));
    }
}
