//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between application services and the outside
//! world. Adapters implement them.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │   LLM   │            │   Store     │              │  Mailer   │
//! │ Adapter │            │   Adapter   │              │  Adapter  │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```

pub mod outbound;
