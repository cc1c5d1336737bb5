//! OpenAI LLM client.
//!
//! Provides an implementation of the [`Llm`] trait for the OpenAI
//! Chat Completions API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use super::{http_client, REQUEST_TIMEOUT};
use crate::domain::activity::ChatMessage;
use crate::error::{Error, Result};
use crate::port::outbound::llm::Llm;

/// OpenAI Chat Completions API endpoint.
const API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI API client.
#[derive(Debug)]
pub struct OpenAi {
    /// HTTP client for API requests.
    client: Client,
    /// API key for authentication.
    api_key: String,
    /// Model identifier (e.g., "gpt-4o-mini").
    model: String,
    /// Maximum tokens to generate in the response.
    max_tokens: u32,
    /// Sampling temperature (0.0 to 2.0).
    temperature: f64,
}

impl OpenAi {
    /// Create a new OpenAI client with explicit configuration.
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
            temperature,
        }
    }

    /// Create a client from the `OPENAI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env(model: impl Into<String>, max_tokens: u32, temperature: f64) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            Error::Config(crate::error::ConfigError::MissingField {
                field: "OPENAI_API_KEY",
            })
        })?;
        Ok(Self::new(api_key, model, max_tokens, temperature))
    }

    /// The timeout is set per request so it holds whatever client was built.
    fn http_request(&self, system: &str, messages: &[ChatMessage]) -> RequestBuilder {
        self.client
            .post(API_URL)
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&self.request(system, messages))
    }

    fn request(&self, system: &str, messages: &[ChatMessage]) -> Request {
        let system = (!system.is_empty()).then(|| Message {
            role: "system",
            content: system.to_string(),
        });
        Request {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            messages: system
                .into_iter()
                .chain(messages.iter().map(|m| Message {
                    role: m.role.as_str(),
                    content: m.content.clone(),
                }))
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct Request {
    model: String,
    max_tokens: u32,
    temperature: f64,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct Response {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl Llm for OpenAi {
    fn name(&self) -> &'static str {
        "openai"
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

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| Error::Llm("empty completion from openai".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_puts_system_prompt_first() {
        let client = OpenAi::new("key", "gpt-4o-mini", 512, 0.7);
        let history = vec![
            ChatMessage::user("What is a list?"),
            ChatMessage::assistant("An ordered collection."),
            ChatMessage::user("And a tuple?"),
        ];

        let json = serde_json::to_value(client.request("You are a tutor.", &history)).unwrap();

        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["max_tokens"], 512);
        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], "You are a tutor.");
        assert_eq!(messages[2]["role"], "assistant");
        assert_eq!(messages[3]["content"], "And a tuple?");
    }

    #[test]
    fn requests_carry_the_timeout() {
        let client = OpenAi::new("key", "gpt-4o-mini", 512, 0.7);
        let request = client
            .http_request("", &[ChatMessage::user("hi")])
            .build()
            .unwrap();
        assert_eq!(request.timeout(), Some(&REQUEST_TIMEOUT));
        assert_eq!(request.url().as_str(), API_URL);
    }

    #[test]
    fn request_omits_empty_system_prompt() {
        let client = OpenAi::new("key", "gpt-4o-mini", 512, 0.7);
        let json = serde_json::to_value(client.request("", &[ChatMessage::user("hi")])).unwrap();
        assert_eq!(json["messages"].as_array().unwrap().len(), 1);
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn response_deserialization() {
        let json = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Lists are mutable."},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 9, "completion_tokens": 12, "total_tokens": 21}
        }"#;

        let response: Response = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.choices[0].message.content.as_deref(),
            Some("Lists are mutable.")
        );
    }

    #[test]
    fn response_with_null_content_parses() {
        let json = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let response: Response = serde_json::from_str(json).unwrap();
        assert!(response.choices[0].message.content.is_none());
    }

    #[test]
    fn malformed_response_missing_choices() {
        let result: std::result::Result<Response, _> = serde_json::from_str(r#"{"id": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn from_env_missing_key() {
        std::env::remove_var("OPENAI_API_KEY");

        let err = OpenAi::from_env("gpt-4o-mini", 512, 0.7).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
