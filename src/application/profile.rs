//! Profile settings and role administration.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::id::ProfileId;
use crate::domain::profile::{Profile, ProfileUpdate, Role};
use crate::error::{Error, Result};
use crate::port::outbound::store::AccountStore;

pub struct ProfileService {
    accounts: Arc<dyn AccountStore>,
}

impl ProfileService {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    pub async fn get(&self, id: &ProfileId) -> Result<Profile> {
        self.accounts
            .get_profile(id)
            .await?
            .ok_or_else(|| Error::not_found("profile", id))
    }

    /// Apply the settings form to the caller's own profile.
    pub async fn update(&self, actor: &Profile, update: ProfileUpdate) -> Result<Profile> {
        let mut profile = self.get(&actor.id).await?;
        update.apply(&mut profile, Utc::now())?;
        self.accounts.update_profile(&profile).await?;
        Ok(profile)
    }

    /// All profiles, newest first. Admin only.
    pub async fn list(&self, actor: &Profile) -> Result<Vec<Profile>> {
        require_admin(actor)?;
        self.accounts.list_profiles().await
    }

    /// Change another profile's role. Admin only.
    pub async fn set_role(&self, actor: &Profile, id: &ProfileId, role: Role) -> Result<Profile> {
        require_admin(actor)?;
        if &actor.id == id && role != Role::Admin {
            return Err(Error::Conflict("admins cannot demote themselves".into()));
        }
        let mut profile = self.get(id).await?;
        profile.role = role;
        profile.updated_at = Utc::now();
        self.accounts.update_profile(&profile).await?;
        info!(profile_id = %id, role = %role, by = %actor.id, "Role changed");
        Ok(profile)
    }
}

pub(crate) fn require_admin(actor: &Profile) -> Result<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(Error::Forbidden("admin access required".into()))
    }
}
