//! Enrollments, progress tracking and certificates.
//!
//! An enrollment moves from `active` to `completed` exactly once, when its
//! progress first reaches 100. Nothing moves it back.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{CertificationId, CourseId, EnrollmentId, ModuleId, ProfileId};

/// A validated completion percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Progress(f64);

impl Progress {
    pub const COMPLETE: Progress = Progress(100.0);

    /// Validate a raw percentage.
    pub fn try_new(value: f64) -> Result<Self, DomainError> {
        if !(0.0..=100.0).contains(&value) {
            return Err(DomainError::ProgressOutOfRange { value });
        }
        Ok(Self(value))
    }

    /// `round(done / total * 100)`, zero when the course has no modules.
    #[must_use]
    pub fn from_ratio(done: usize, total: usize) -> Self {
        if total == 0 {
            return Self(0.0);
        }
        let done = done.min(total);
        Self((done as f64 / total as f64 * 100.0).round())
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn is_complete(self) -> bool {
        self.0 >= 100.0
    }
}

/// Lifecycle state of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Active,
    Completed,
}

impl EnrollmentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnrollmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidChoice {
                field: "status",
                value: s.to_string(),
                expected: "active, completed",
            }),
        }
    }
}

/// A student's enrollment in a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub student_id: ProfileId,
    pub course_id: CourseId,
    pub progress: f64,
    pub status: EnrollmentStatus,
    pub completed_modules: Vec<ModuleId>,
    pub enrolled_at: DateTime<Utc>,
    pub last_accessed: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Enrollment {
    #[must_use]
    pub fn new(student_id: ProfileId, course_id: CourseId, now: DateTime<Utc>) -> Self {
        Self {
            id: EnrollmentId::new(),
            student_id,
            course_id,
            progress: 0.0,
            status: EnrollmentStatus::Active,
            completed_modules: Vec::new(),
            enrolled_at: now,
            last_accessed: None,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == EnrollmentStatus::Completed
    }

    /// Record new progress. Returns `true` when this call completed the course.
    ///
    /// A completed enrollment stays at 100%; later updates only touch
    /// `last_accessed`.
    pub fn record_progress(&mut self, progress: Progress, now: DateTime<Utc>) -> bool {
        self.last_accessed = Some(now);
        if self.is_completed() {
            return false;
        }
        self.progress = progress.value();
        if progress.is_complete() {
            self.status = EnrollmentStatus::Completed;
            self.completed_at = Some(now);
            return true;
        }
        false
    }

    /// Mark a module done and recompute progress from the module ratio.
    ///
    /// Completing the same module twice changes nothing but `last_accessed`.
    /// Returns `true` when this call completed the course.
    pub fn complete_module(
        &mut self,
        module_id: ModuleId,
        active_modules: usize,
        now: DateTime<Utc>,
    ) -> bool {
        if !self.completed_modules.contains(&module_id) {
            self.completed_modules.push(module_id);
        }
        let progress = Progress::from_ratio(self.completed_modules.len(), active_modules);
        self.record_progress(progress, now)
    }
}

/// A certificate issued when an enrollment completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub id: CertificationId,
    pub student_id: ProfileId,
    pub course_id: CourseId,
    pub certificate_number: String,
    pub issued_at: DateTime<Utc>,
}

impl Certification {
    /// Issue a certificate numbered `LH-<year>-<8 hex>`.
    #[must_use]
    pub fn issue(student_id: ProfileId, course_id: CourseId, serial: u32, now: DateTime<Utc>) -> Self {
        Self {
            id: CertificationId::new(),
            student_id,
            course_id,
            certificate_number: format!("LH-{}-{:08X}", now.year(), serial),
            issued_at: now,
        }
    }
}
