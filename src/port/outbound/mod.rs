//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: storage, the LLM
//! provider and mail delivery.

pub mod llm;
pub mod mailer;
pub mod store;
