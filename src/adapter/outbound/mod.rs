//! Outbound adapters (driven side).

pub mod llm;
pub mod mailer;
pub mod sqlite;
