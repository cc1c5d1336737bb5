//! Courses and their ordered modules.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{required, DomainError};
use super::id::{CourseId, ModuleId, ProfileId};
use super::profile::Role;

/// Course difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(DomainError::InvalidChoice {
                field: "difficulty",
                value: s.to_string(),
                expected: "beginner, intermediate, advanced",
            }),
        }
    }
}

/// A course in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub duration_hours: f64,
    pub instructor_id: Option<ProfileId>,
    pub instructor_name: Option<String>,
    pub tags: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// One-line description used to ground tutor answers.
    ///
    /// `Course: <title> (<category>, <difficulty> level). <description>`
    #[must_use]
    pub fn info_line(&self) -> String {
        format!(
            "Course: {} ({}, {} level). {}",
            self.title, self.category, self.difficulty, self.description
        )
        .trim_end()
        .to_string()
    }

    /// Whether `profile` may edit or delete this course.
    #[must_use]
    pub fn is_owned_by(&self, profile: &ProfileId) -> bool {
        self.instructor_id.as_ref() == Some(profile)
    }

    /// Inactive courses exist only for faculty and admins.
    #[must_use]
    pub fn is_visible_to(&self, role: Role) -> bool {
        self.is_active || role.can_teach()
    }
}

/// Input for creating a course.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default)]
    pub duration_hours: f64,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_category() -> String {
    "General".into()
}

fn default_difficulty() -> String {
    "beginner".into()
}

impl CourseDraft {
    /// Validate the draft and build an active course owned by `instructor`.
    pub fn into_course(
        self,
        instructor_id: ProfileId,
        instructor_name: String,
        now: DateTime<Utc>,
    ) -> Result<Course, DomainError> {
        let difficulty: Difficulty = self.difficulty.parse()?;
        let duration_hours = validate_duration(self.duration_hours)?;
        Ok(Course {
            id: CourseId::new(),
            title: required("title", &self.title)?,
            description: self.description.trim().to_string(),
            category: required("category", &self.category)?,
            difficulty,
            duration_hours,
            instructor_id: Some(instructor_id),
            instructor_name: Some(instructor_name),
            tags: self.tags,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial update of a course.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub duration_hours: Option<f64>,
    pub tags: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

impl CourseUpdate {
    pub fn apply(self, course: &mut Course, now: DateTime<Utc>) -> Result<(), DomainError> {
        if let Some(title) = self.title {
            course.title = required("title", &title)?;
        }
        if let Some(description) = self.description {
            course.description = description.trim().to_string();
        }
        if let Some(category) = self.category {
            course.category = required("category", &category)?;
        }
        if let Some(difficulty) = self.difficulty {
            course.difficulty = difficulty.parse()?;
        }
        if let Some(hours) = self.duration_hours {
            course.duration_hours = validate_duration(hours)?;
        }
        if let Some(tags) = self.tags {
            course.tags = tags;
        }
        if let Some(active) = self.is_active {
            course.is_active = active;
        }
        course.updated_at = now;
        Ok(())
    }
}

fn validate_duration(hours: f64) -> Result<f64, DomainError> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(DomainError::OutOfRange {
            field: "duration_hours",
            value: hours as i64,
            min: 0,
            max: i64::from(i32::MAX),
        });
    }
    Ok(hours)
}

/// One lesson in a course player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseModule {
    pub id: ModuleId,
    pub course_id: CourseId,
    pub title: String,
    pub description: String,
    pub video_url: Option<String>,
    pub duration_minutes: i32,
    pub order_index: i32,
    pub content: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for adding a module to a course.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub video_url: Option<String>,
    #[serde(default)]
    pub duration_minutes: i32,
    pub order_index: Option<i32>,
    pub content: Option<String>,
}

impl ModuleDraft {
    /// Build the module. `next_index` is used when no order index was given.
    pub fn into_module(
        self,
        course_id: CourseId,
        next_index: i32,
        now: DateTime<Utc>,
    ) -> Result<CourseModule, DomainError> {
        if self.duration_minutes < 0 {
            return Err(DomainError::OutOfRange {
                field: "duration_minutes",
                value: i64::from(self.duration_minutes),
                min: 0,
                max: i64::from(i32::MAX),
            });
        }
        Ok(CourseModule {
            id: ModuleId::new(),
            course_id,
            title: required("title", &self.title)?,
            description: self.description.trim().to_string(),
            video_url: self.video_url.filter(|u| !u.trim().is_empty()),
            duration_minutes: self.duration_minutes,
            order_index: self.order_index.unwrap_or(next_index),
            content: self.content,
            is_active: true,
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> CourseDraft {
        CourseDraft {
            title: "  Intro to Rust ".into(),
            description: "Ownership and borrowing".into(),
            category: "Programming".into(),
            difficulty: "Intermediate".into(),
            duration_hours: 12.0,
            tags: vec!["rust".into()],
        }
    }

    #[test]
    fn draft_builds_active_course() {
        let owner = ProfileId::new();
        let course = draft()
            .into_course(owner.clone(), "Dr. Ferris".into(), Utc::now())
            .unwrap();
        assert_eq!(course.title, "Intro to Rust");
        assert_eq!(course.difficulty, Difficulty::Intermediate);
        assert!(course.is_active);
        assert!(course.is_owned_by(&owner));
    }

    #[test]
    fn draft_rejects_unknown_difficulty() {
        let mut bad = draft();
        bad.difficulty = "expert".into();
        let err = bad
            .into_course(ProfileId::new(), "x".into(), Utc::now())
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidChoice {
                field: "difficulty",
                ..
            }
        ));
    }

    #[test]
    fn info_line_matches_tutor_format() {
        let course = draft()
            .into_course(ProfileId::new(), "x".into(), Utc::now())
            .unwrap();
        assert_eq!(
            course.info_line(),
            "Course: Intro to Rust (Programming, intermediate level). Ownership and borrowing"
        );
    }

    #[test]
    fn info_line_without_description_has_no_trailing_space() {
        let mut d = draft();
        d.description = String::new();
        let course = d
            .into_course(ProfileId::new(), "x".into(), Utc::now())
            .unwrap();
        assert!(course.info_line().ends_with("level)."));
    }

    #[test]
    fn module_appends_when_no_index() {
        let module = ModuleDraft {
            title: "Borrowing".into(),
            description: String::new(),
            video_url: Some(" ".into()),
            duration_minutes: 30,
            order_index: None,
            content: None,
        }
        .into_module(CourseId::new(), 4, Utc::now())
        .unwrap();
        assert_eq!(module.order_index, 4);
        assert_eq!(module.video_url, None);
    }
}
