//! LLM chat port for the tutor.
//!
//! Defines a generic interface for chat-completion requests: a system prompt
//! followed by the running conversation.

use async_trait::async_trait;

use crate::domain::activity::ChatMessage;
use crate::error::Result;

/// Client for large language model chat completion.
///
/// Implementations wrap specific LLM providers (OpenAI, Anthropic, etc.) and
/// handle authentication and response parsing.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`) so one client can
/// serve concurrent HTTP requests.
///
/// # Errors
///
/// [`chat`](Self::chat) returns an error for API failures, rate limits, or
/// invalid responses. Callers fall back to canned text on error.
#[async_trait]
pub trait Llm: Send + Sync {
    /// Return the provider name for logging.
    fn name(&self) -> &'static str;

    /// Send a chat request and return the assistant's reply.
    ///
    /// # Arguments
    ///
    /// * `system` - Instructions placed before the conversation.
    /// * `messages` - Prior turns followed by the new user message.
    async fn chat(&self, system: &str, messages: &[ChatMessage]) -> Result<String>;
}
