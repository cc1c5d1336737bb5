//! Anthropic Claude LLM client.
//!
//! Provides an implementation of the [`Llm`] trait for the Anthropic
//! Messages API. The system prompt travels in the top-level `system` field;
//! the Messages API rejects a `system` role inside `messages`.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use super::{http_client, REQUEST_TIMEOUT};
use crate::domain::activity::{ChatMessage, ChatRole};
use crate::error::{Error, Result};
use crate::port::outbound::llm::Llm;

/// Anthropic Messages API endpoint.
const API_URL: &str = "https://api.anthropic.com/v1/messages";

/// API version header value.
const API_VERSION: &str = "2023-06-01";

/// Anthropic Claude API client.
#[derive(Debug)]
pub struct Anthropic {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl Anthropic {
    /// Create a new Anthropic client with explicit configuration.
    #[must_use]
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        max_tokens: u32,
        temperature: f64,
    ) -> Self {
        Self {
            client: http_client(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens,
            // The Messages API caps temperature at 1.0.
            temperature: temperature.min(1.0),
        }
    }

    /// Create a client from the `ANTHROPIC_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env(model: impl Into<String>, max_tokens: u32, temperature: f64) -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
            Error::Config(crate::error::ConfigError::MissingField {
                field: "ANTHROPIC_API_KEY",
            })
        })?;
        Ok(Self::new(api_key, model, max_tokens, temperature))
    }

    fn http_request(&self, system: &str, messages: &[ChatMessage]) -> RequestBuilder {
        self.client
            .post(API_URL)
            .timeout(REQUEST_TIMEOUT)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&self.request(system, messages))
    }

    fn request(&self, system: &str, messages: &[ChatMessage]) -> Request {
        Request {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system: (!system.is_empty()).then(|| system.to_string()),
            messages: messages
                .iter()
                .filter(|m| m.role != ChatRole::System)
                .map(|m| Message {
                    role: m.role.as_str(),
                    content: m.content.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct Request {
    model: String,
    max_tokens: u32,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct Response {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl Llm for Anthropic {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn chat(&self, system: &str, messages: &[ChatMessage]) -> Result<String> {
        let response = self
            .http_request(system, messages)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Llm(e.to_string()))?
            .json::<Response>()
            .await?;

        let text: String = response.content.into_iter().map(|c| c.text).collect();
        if text.trim().is_empty() {
            return Err(Error::Llm("empty completion from anthropic".into()));
        }
        Ok(text)
    }
}


/// Integration tests that require real API access.
/// Run with: `cargo test --features integration-tests -- --ignored`
#[cfg(all(test, feature = "integration-tests"))]
mod integration_tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    #[ignore = "requires ANTHROPIC_API_KEY and network access"]
    async fn tutor_style_chat() {
        let client = match Anthropic::from_env("claude-3-5-haiku-latest", 256, 0.2) {
            Ok(client) => client,
            Err(e) => {
                eprintln!("Skipping Anthropic integration test: {}", e);
                return;
            }
        };

        let result = tokio::time::timeout(
            Duration::from_secs(30),
            client.chat(
                "You are a concise tutor.",
                &[ChatMessage::user("Say 'hello' and nothing else.")],
            ),
        )
        .await
        .expect("Request timed out")
        .expect("API call failed");

        assert!(result.to_lowercase().contains("hello"), "{result}");
    }
}
