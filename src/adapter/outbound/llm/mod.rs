//! LLM adapter modules.
//!
//! Provides implementations of the [`Llm`](crate::port::outbound::llm::Llm) trait
//! for Anthropic Claude and OpenAI.

use std::time::Duration;

use tracing::warn;

pub mod anthropic;
pub mod client;
pub mod openai;

/// Upper bound on a single completion round trip.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|e| {
            warn!(error = %e, "Failed to configure LLM HTTP client, using defaults");
            reqwest::Client::new()
        })
}
