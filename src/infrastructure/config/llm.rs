//! LLM provider configuration.
//!
//! The tutor answers from canned templates unless a provider is enabled
//! here. API keys are read from environment variables (`ANTHROPIC_API_KEY`
//! or `OPENAI_API_KEY`) at runtime, never from the file.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// `[llm]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Route tutor questions to the provider.
    ///
    /// Defaults to false.
    #[serde(default)]
    pub enabled: bool,

    /// Defaults to OpenAI.
    #[serde(default)]
    pub provider: LlmProvider,

    /// Used when `provider` is set to `anthropic`.
    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// Used when `provider` is set to `openai`.
    #[serde(default)]
    pub openai: OpenAiConfig,
}

/// LLM provider selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Anthropic Claude models.
    Anthropic,
    /// OpenAI GPT models.
    #[default]
    OpenAi,
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
        })
    }
}

/// Anthropic-specific configuration. Requires `ANTHROPIC_API_KEY`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicConfig {
    /// Defaults to "claude-3-5-haiku-latest".
    #[serde(default = "default_anthropic_model")]
    pub model: String,

    /// Sampling temperature in `[0, 2]`. Defaults to 0.7.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Maximum tokens in the response. Defaults to 1024.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            model: default_anthropic_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// OpenAI-specific configuration. Requires `OPENAI_API_KEY`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Defaults to "gpt-4o-mini".
    #[serde(default = "default_openai_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            model: default_openai_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl LlmConfig {
    /// Model, temperature and token limit of the selected provider.
    #[must_use]
    pub fn active(&self) -> (&str, f64, u32) {
        match self.provider {
            LlmProvider::Anthropic => (
                &self.anthropic.model,
                self.anthropic.temperature,
                self.anthropic.max_tokens,
            ),
            LlmProvider::OpenAi => (
                &self.openai.model,
                self.openai.temperature,
                self.openai.max_tokens,
            ),
        }
    }

    /// Checks the selected provider only.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (model, temperature, max_tokens) = self.active();
        if model.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "llm.model" });
        }
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::InvalidValue {
                field: "llm.temperature",
                reason: format!("must be between 0 and 2, got {temperature}"),
            });
        }
        if max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                field: "llm.max_tokens",
                reason: "must be greater than 0".into(),
            });
        }
        Ok(())
    }
}

fn default_anthropic_model() -> String {
    "claude-3-5-haiku-latest".into()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".into()
}

fn default_temperature() -> f64 {
    0.7
}

const fn default_max_tokens() -> u32 {
    1024
}
