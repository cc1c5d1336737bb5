//! Tutor configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Largest accepted `history_window`.
pub const MAX_HISTORY_WINDOW: usize = 50;

/// Configuration for the AI tutor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorConfig {
    /// Number of trailing history messages forwarded to the LLM.
    #[serde(default = "default_history_window")]
    pub history_window: usize,
    /// Maximum question length in characters.
    #[serde(default = "default_max_question_length")]
    pub max_question_length: usize,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
            max_question_length: default_max_question_length(),
        }
    }
}

impl TutorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_window > MAX_HISTORY_WINDOW {
            return Err(ConfigError::InvalidValue {
                field: "tutor.history_window",
                reason: format!("must be at most {MAX_HISTORY_WINDOW}"),
            });
        }
        if self.max_question_length == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tutor.max_question_length",
                reason: "must be greater than 0".into(),
            });
        }
        Ok(())
    }
}

const fn default_history_window() -> usize {
    6
}

const fn default_max_question_length() -> usize {
    2000
}
