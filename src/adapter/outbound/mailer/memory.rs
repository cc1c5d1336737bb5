use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::port::outbound::mailer::Mailer;

/// One message captured by [`MemoryMailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub email: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Keeps every message in memory. Clones share the outbox.
#[derive(Debug, Default, Clone)]
pub struct MemoryMailer {
    outbox: Arc<Mutex<Vec<SentMail>>>,
}

impl MemoryMailer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far, oldest first.
    #[must_use]
    pub fn sent(&self) -> Vec<SentMail> {
        self.outbox
            .lock()
            .map(|outbox| outbox.clone())
            .unwrap_or_default()
    }

    /// Token of the most recent message to `email`.
    #[must_use]
    pub fn last_token_for(&self, email: &str) -> Option<String> {
        self.sent()
            .into_iter()
            .rev()
            .find(|m| m.email == email)
            .map(|m| m.token)
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn send_password_reset(
        &self,
        email: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        if let Ok(mut outbox) = self.outbox.lock() {
            outbox.push(SentMail {
                email: email.to_string(),
                token: token.to_string(),
                expires_at,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clones_share_outbox() {
        let mailer = MemoryMailer::new();
        let handle = mailer.clone();
        mailer
            .send_password_reset("a@b.edu", "t1", Utc::now())
            .await
            .unwrap();
        mailer
            .send_password_reset("a@b.edu", "t2", Utc::now())
            .await
            .unwrap();

        assert_eq!(handle.sent().len(), 2);
        assert_eq!(handle.last_token_for("a@b.edu").as_deref(), Some("t2"));
        assert!(handle.last_token_for("c@d.edu").is_none());
    }
}
