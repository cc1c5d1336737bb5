//! User profiles and roles.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{required, DomainError};
use super::id::ProfileId;

/// Role of a platform user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Faculty,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Faculty, Role::Admin];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Faculty => "faculty",
            Self::Admin => "admin",
        }
    }

    /// Whether the role may author courses, modules and reminders.
    #[must_use]
    pub const fn can_teach(self) -> bool {
        matches!(self, Self::Faculty | Self::Admin)
    }

    /// Whether a visitor may pick this role at sign-up.
    #[must_use]
    pub const fn is_self_service(self) -> bool {
        matches!(self, Self::Student | Self::Faculty)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "faculty" => Ok(Self::Faculty),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidChoice {
                field: "role",
                value: s.to_string(),
                expected: "student, faculty, admin",
            }),
        }
    }
}

/// A user account as seen by the rest of the application.
///
/// The password hash is deliberately not part of this type; see
/// [`Account`](super::account::Account).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub program: Option<String>,
    pub interests: Vec<String>,
    pub learning_style: Option<String>,
    pub target_career: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Create a fresh profile with empty preferences.
    pub fn new(
        email: &str,
        full_name: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id: ProfileId::new(),
            email: normalize_email(email)?,
            full_name: required("full_name", full_name)?,
            role,
            program: None,
            interests: Vec::new(),
            learning_style: None,
            target_career: None,
            created_at: now,
            updated_at: now,
        })
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Trim and lower-case an email address, rejecting obvious garbage.
pub fn normalize_email(raw: &str) -> Result<String, DomainError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(DomainError::Required { field: "email" });
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(DomainError::InvalidEmail(raw.trim().to_string())),
    }
}

/// Fields a user may change from the settings page.
///
/// `None` leaves a field untouched. An empty string clears an optional field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub program: Option<String>,
    pub interests: Option<Vec<String>>,
    pub learning_style: Option<String>,
    pub target_career: Option<String>,
}

impl ProfileUpdate {
    /// Apply the update, bumping `updated_at`.
    pub fn apply(self, profile: &mut Profile, now: DateTime<Utc>) -> Result<(), DomainError> {
        if let Some(name) = self.full_name {
            profile.full_name = required("full_name", &name)?;
        }
        if let Some(program) = self.program {
            profile.program = non_blank(program);
        }
        if let Some(interests) = self.interests {
            profile.interests = interests
                .into_iter()
                .map(|i| i.trim().to_string())
                .filter(|i| !i.is_empty())
                .collect();
        }
        if let Some(style) = self.learning_style {
            profile.learning_style = non_blank(style);
        }
        if let Some(career) = self.target_career {
            profile.target_career = non_blank(career);
        }
        profile.updated_at = now;
        Ok(())
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
