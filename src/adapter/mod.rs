//! Adapters: the edges of the hexagon.
//!
//! - [`inbound`] - HTTP API and command-line interface
//! - [`outbound`] - SQLite store, LLM providers and mailers

pub mod inbound;
pub mod outbound;
