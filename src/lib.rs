//! learnhub - a learning-management backend.
//!
//! Serves the student, faculty and admin dashboards over a JSON API:
//! course catalog, enrollment and progress tracking, certificates,
//! notifications, an AI tutor with template fallback, quiz generation,
//! research assistance, course recommendations and career roadmaps.
//!
//! # Architecture
//!
//! The crate is laid out hexagonally:
//!
//! - [`domain`] - Entities and validation rules, free of I/O
//! - [`port`] - Traits the application needs from the outside world
//! - [`application`] - One service per area, enforcing authorization
//! - [`adapter`] - axum HTTP and clap CLI on the inbound side; SQLite,
//!   LLM providers and mailers on the outbound side
//! - [`infrastructure`] - Configuration, factories and the composition root
//! - [`error`] - Crate-wide error type
//!
//! # Example
//!
//! ```no_run
//! use learnhub::infrastructure::bootstrap;
//! use learnhub::infrastructure::config::settings::Config;
//!
//! # async fn run() -> learnhub::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let app = bootstrap::build_app(&config)?;
//! learnhub::adapter::inbound::http::serve(app.router, &config.server.bind_addr()).await
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
