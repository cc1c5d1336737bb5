//! Account registration, sign-in and password recovery.
//!
//! Passwords are hashed with Argon2id. Session and reset tokens are 32
//! random bytes handed to the client as base64url; only their SHA-256 is
//! persisted.

use std::sync::Arc;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::domain::account::{AuthSession, PasswordReset};
use crate::domain::error::DomainError;
use crate::domain::profile::{normalize_email, Profile, Role};
use crate::error::{AuthError, Error, Result};
use crate::port::outbound::mailer::Mailer;
use crate::port::outbound::store::AccountStore;

const TOKEN_BYTES: usize = 32;

/// Lifetimes and password rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthPolicy {
    pub session_ttl: Duration,
    pub reset_ttl: Duration,
    pub min_password_length: usize,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self {
            session_ttl: Duration::hours(24),
            reset_ttl: Duration::minutes(30),
            min_password_length: 8,
        }
    }
}

/// A freshly issued bearer session.
#[derive(Debug, Clone, Serialize)]
pub struct SignedIn {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub profile: Profile,
}

/// New account request.
#[derive(Debug, Clone)]
pub struct SignUp {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Option<Role>,
}

pub struct AuthService {
    accounts: Arc<dyn AccountStore>,
    mailer: Arc<dyn Mailer>,
    policy: AuthPolicy,
}

impl AuthService {
    pub fn new(accounts: Arc<dyn AccountStore>, mailer: Arc<dyn Mailer>, policy: AuthPolicy) -> Self {
        Self {
            accounts,
            mailer,
            policy,
        }
    }

    /// Register a self-service account (student or faculty).
    pub async fn sign_up(&self, request: SignUp) -> Result<Profile> {
        let role = request.role.unwrap_or(Role::Student);
        if !role.is_self_service() {
            return Err(Error::Forbidden(format!(
                "{role} accounts cannot be created by sign-up"
            )));
        }
        self.create_account(&request.email, &request.password, &request.full_name, role)
            .await
    }

    /// Create an account of any role. Used by seeding and admin tooling.
    pub async fn create_account(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        role: Role,
    ) -> Result<Profile> {
        self.check_password(password)?;
        let profile = Profile::new(email, full_name, role, Utc::now())?;
        let hash = hash_password(password)?;
        self.accounts.insert_account(&profile, &hash).await?;
        info!(profile_id = %profile.id, role = %profile.role, "Account created");
        Ok(profile)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SignedIn> {
        let email = normalize_email(email).map_err(|_| AuthError::InvalidCredentials)?;
        let account = self
            .accounts
            .find_account_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        if !verify_password(password, &account.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = new_token();
        let now = Utc::now();
        let session = AuthSession {
            token_hash: hash_token(&token),
            profile_id: account.profile.id.clone(),
            created_at: now,
            expires_at: now + self.policy.session_ttl,
        };
        self.accounts.insert_session(&session).await?;
        info!(profile_id = %account.profile.id, "Signed in");

        Ok(SignedIn {
            token,
            expires_at: session.expires_at,
            profile: account.profile,
        })
    }

    /// Revoke a session. Returns whether one existed.
    pub async fn sign_out(&self, token: &str) -> Result<bool> {
        self.accounts.delete_session(&hash_token(token)).await
    }

    /// Resolve a bearer token to its profile.
    pub async fn authenticate(&self, token: &str) -> Result<Profile> {
        let token_hash = hash_token(token);
        let session = self
            .accounts
            .find_session(&token_hash)
            .await?
            .ok_or(AuthError::InvalidSession)?;
        if session.is_expired(Utc::now()) {
            self.accounts.delete_session(&token_hash).await?;
            return Err(AuthError::InvalidSession.into());
        }
        self.accounts
            .get_profile(&session.profile_id)
            .await?
            .ok_or_else(|| AuthError::InvalidSession.into())
    }

    /// Start password recovery. Succeeds whether or not the email is known.
    pub async fn request_password_reset(&self, email: &str) -> Result<()> {
        let Ok(email) = normalize_email(email) else {
            return Ok(());
        };
        let Some(account) = self.accounts.find_account_by_email(&email).await? else {
            info!("Password reset requested for unknown email");
            return Ok(());
        };

        let token = new_token();
        let now = Utc::now();
        let reset = PasswordReset {
            token_hash: hash_token(&token),
            profile_id: account.profile.id.clone(),
            created_at: now,
            expires_at: now + self.policy.reset_ttl,
            used: false,
        };
        self.accounts.insert_password_reset(&reset).await?;

        if let Err(e) = self
            .mailer
            .send_password_reset(&email, &token, reset.expires_at)
            .await
        {
            warn!(mailer = self.mailer.name(), error = %e, "Failed to deliver reset token");
        }
        Ok(())
    }

    /// Redeem a reset token. Revokes every session of the account.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<()> {
        self.check_password(new_password)?;
        let token_hash = hash_token(token);
        let reset = self
            .accounts
            .find_password_reset(&token_hash)
            .await?
            .filter(|r| r.is_redeemable(Utc::now()))
            .ok_or(AuthError::InvalidResetToken)?;

        let hash = hash_password(new_password)?;
        // Claim before writing so concurrent redeemers cannot both succeed.
        if !self.accounts.mark_password_reset_used(&token_hash).await? {
            return Err(AuthError::InvalidResetToken.into());
        }
        self.accounts.update_password(&reset.profile_id, &hash).await?;
        let revoked = self.accounts.delete_sessions_for(&reset.profile_id).await?;
        info!(profile_id = %reset.profile_id, revoked, "Password reset");
        Ok(())
    }

    fn check_password(&self, password: &str) -> Result<()> {
        let min = self.policy.min_password_length;
        if password.chars().count() < min {
            return Err(DomainError::TooShort {
                field: "password",
                min,
            }
            .into());
        }
        Ok(())
    }
}

fn new_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Hex-encoded SHA-256 of a token.
fn hash_token(token: &str) -> String {
    Sha256::digest(token.as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

fn hash_password(password: &str) -> Result<String> {
    let mut salt = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt);
    let salt = SaltString::encode_b64(&salt).map_err(|e| AuthError::Hashing(e.to_string()))?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()).into())
}

fn verify_password(password: &str, stored: &str) -> bool {
    PasswordHash::new(stored)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
