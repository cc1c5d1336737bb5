//! In-app notifications and reminders.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{NotificationId, ProfileId};

const DEFAULT_TITLE: &str = "Reminder";
const DEFAULT_MESSAGE: &str = "You have an upcoming item.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub recipient_id: ProfileId,
    pub title: String,
    pub message: String,
    pub due_date: Option<NaiveDate>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    #[must_use]
    pub fn new(
        recipient_id: ProfileId,
        title: impl Into<String>,
        message: impl Into<String>,
        due_date: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            recipient_id,
            title: title.into(),
            message: message.into(),
            due_date,
            is_read: false,
            created_at: now,
        }
    }

    /// Sent when a student enrolls in a course.
    #[must_use]
    pub fn welcome(recipient_id: ProfileId, course_title: &str, now: DateTime<Utc>) -> Self {
        Self::new(
            recipient_id,
            format!("Welcome to {course_title}!"),
            format!("You have successfully enrolled in {course_title}. Start learning now!"),
            None,
            now,
        )
    }

    /// Sent when a course is completed and a certificate issued.
    #[must_use]
    pub fn course_completed(
        recipient_id: ProfileId,
        course_title: &str,
        certificate_number: &str,
        now: DateTime<Utc>,
    ) -> Self {
        Self::new(
            recipient_id,
            "Course completed!",
            format!(
                "Congratulations on completing {course_title}! Your certificate number is {certificate_number}."
            ),
            None,
            now,
        )
    }
}

/// A reminder composed by faculty. Blank fields fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationDraft {
    pub title: Option<String>,
    pub message: Option<String>,
    pub due_date: Option<String>,
}

impl NotificationDraft {
    pub fn into_notification(
        self,
        recipient_id: ProfileId,
        now: DateTime<Utc>,
    ) -> Result<Notification, DomainError> {
        let due_date = match self.due_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                DomainError::InvalidChoice {
                    field: "due_date",
                    value: raw.to_string(),
                    expected: "a date formatted YYYY-MM-DD",
                }
            })?),
        };
        Ok(Notification::new(
            recipient_id,
            or_default(self.title, DEFAULT_TITLE),
            or_default(self.message, DEFAULT_MESSAGE),
            due_date,
            now,
        ))
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
