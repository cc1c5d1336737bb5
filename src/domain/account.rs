//! Credentials, bearer sessions and password-reset tokens.
//!
//! Tokens are never stored in plaintext. Both sessions and reset requests
//! are keyed by the hex SHA-256 of the token handed to the client.

use chrono::{DateTime, Utc};

use super::id::ProfileId;
use super::profile::Profile;

/// A profile together with its password hash.
#[derive(Debug, Clone)]
pub struct Account {
    pub profile: Profile,
    pub password_hash: String,
}

/// An issued bearer session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token_hash: String,
    pub profile_id: ProfileId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// A one-shot password reset request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordReset {
    pub token_hash: String,
    pub profile_id: ProfileId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
}

impl PasswordReset {
    /// A reset token may be redeemed once, before it expires.
    #[must_use]
    pub fn is_redeemable(&self, now: DateTime<Utc>) -> bool {
        !self.used && now < self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn reset_is_single_use_and_expires() {
        let now = Utc::now();
        let mut reset = PasswordReset {
            token_hash: "h".into(),
            profile_id: ProfileId::new(),
            created_at: now,
            expires_at: now + Duration::minutes(30),
            used: false,
        };
        assert!(reset.is_redeemable(now));
        assert!(!reset.is_redeemable(now + Duration::minutes(31)));
        reset.used = true;
        assert!(!reset.is_redeemable(now));
    }

    #[test]
    fn session_expiry_is_inclusive() {
        let now = Utc::now();
        let session = AuthSession {
            token_hash: "h".into(),
            profile_id: ProfileId::new(),
            created_at: now,
            expires_at: now,
        };
        assert!(session.is_expired(now));
    }
}
