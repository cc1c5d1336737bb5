//! Mail delivery adapters.
//!
//! Implements the [`Mailer`](crate::port::outbound::mailer::Mailer) port.
//! No SMTP transport ships with the server: [`LogMailer`] writes tokens to
//! the log and [`MemoryMailer`] keeps them for inspection.

mod log;
mod memory;

pub use log::LogMailer;
pub use memory::{MemoryMailer, SentMail};
