//! Notification inbox and faculty reminders.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::id::{NotificationId, ProfileId};
use crate::domain::notification::{Notification, NotificationDraft};
use crate::domain::profile::Profile;
use crate::error::{Error, Result};
use crate::port::outbound::store::{AccountStore, NotificationStore};

pub struct NotificationService {
    accounts: Arc<dyn AccountStore>,
    notifications: Arc<dyn NotificationStore>,
}

impl NotificationService {
    pub fn new(accounts: Arc<dyn AccountStore>, notifications: Arc<dyn NotificationStore>) -> Self {
        Self {
            accounts,
            notifications,
        }
    }

    pub async fn list(&self, actor: &Profile, unread_only: bool) -> Result<Vec<Notification>> {
        self.notifications
            .list_notifications(&actor.id, unread_only)
            .await
    }

    /// Send a reminder to a student. Faculty and admins only.
    pub async fn send(
        &self,
        actor: &Profile,
        recipient_id: &ProfileId,
        draft: NotificationDraft,
    ) -> Result<Notification> {
        if !actor.role.can_teach() {
            return Err(Error::Forbidden(
                "only faculty and admins can send notifications".into(),
            ));
        }
        if self.accounts.get_profile(recipient_id).await?.is_none() {
            return Err(Error::not_found("profile", recipient_id));
        }
        let notification = draft.into_notification(recipient_id.clone(), Utc::now())?;
        self.notifications.insert_notification(&notification).await?;
        info!(recipient = %recipient_id, by = %actor.id, "Notification sent");
        Ok(notification)
    }

    /// Flag one notification read. Repeating the call is harmless.
    pub async fn mark_read(&self, actor: &Profile, id: &NotificationId) -> Result<Notification> {
        let mut notification = self.owned(actor, id).await?;
        if !notification.is_read {
            self.notifications.mark_notification_read(id).await?;
            notification.is_read = true;
        }
        Ok(notification)
    }

    /// Flag every unread notification read. Returns how many changed.
    pub async fn mark_all_read(&self, actor: &Profile) -> Result<usize> {
        self.notifications.mark_all_notifications_read(&actor.id).await
    }

    pub async fn delete(&self, actor: &Profile, id: &NotificationId) -> Result<()> {
        self.owned(actor, id).await?;
        self.notifications.delete_notification(id).await?;
        Ok(())
    }

    async fn owned(&self, actor: &Profile, id: &NotificationId) -> Result<Notification> {
        let notification = self
            .notifications
            .get_notification(id)
            .await?
            .ok_or_else(|| Error::not_found("notification", id))?;
        if notification.recipient_id != actor.id {
            return Err(Error::Forbidden("not your notification".into()));
        }
        Ok(notification)
    }
}
