//! LLM client factory.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::outbound::llm::anthropic::Anthropic;
use crate::adapter::outbound::llm::openai::OpenAi;
use crate::infrastructure::config::llm::{LlmConfig, LlmProvider};
use crate::port::outbound::llm::Llm;

/// Build LLM client from configuration.
///
/// Returns `None` if the LLM is disabled or the provider's API key is
/// missing. The tutor then answers from templates.
pub fn build_llm_client(config: &LlmConfig) -> Option<Arc<dyn Llm>> {
    if !config.enabled {
        return None;
    }

    let (model, temperature, max_tokens) = config.active();
    let client: Arc<dyn Llm> = match config.provider {
        LlmProvider::Anthropic => match Anthropic::from_env(model, max_tokens, temperature) {
            Ok(client) => Arc::new(client),
            Err(_) => {
                warn!("ANTHROPIC_API_KEY not set, tutor falls back to templates");
                return None;
            }
        },
        LlmProvider::OpenAi => match OpenAi::from_env(model, max_tokens, temperature) {
            Ok(client) => Arc::new(client),
            Err(_) => {
                warn!("OPENAI_API_KEY not set, tutor falls back to templates");
                return None;
            }
        },
    };

    info!(provider = client.name(), model, "LLM client initialized");
    Some(client)
}
