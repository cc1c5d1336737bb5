//! Outbound mail port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;

/// Delivers account emails.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Return the mailer name for logging.
    fn name(&self) -> &'static str;

    /// Deliver a password reset token to `email`.
    async fn send_password_reset(
        &self,
        email: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()>;
}
