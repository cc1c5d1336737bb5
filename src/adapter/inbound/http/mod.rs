//! HTTP API served with axum.
//!
//! ```text
//! request ─> TraceLayer ─> CORS ─> Router ─> handler ─> application service
//!                                               │
//!                                  CurrentUser (bearer session)
//! ```
//!
//! Every route except `/`, `/health` and `/auth/*` requires
//! `Authorization: Bearer <token>`. Errors are `{"error": "<message>"}`.

pub mod error;
pub mod extract;
pub mod handler;
pub mod server;
pub mod state;

pub use server::{cors_layer, router, serve, ServerConfig};
pub use state::AppState;
