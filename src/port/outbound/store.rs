//! Persistence ports for the learning platform.
//!
//! One trait per aggregate. The SQLite adapter implements all of them on a
//! single type; services depend only on the slice they need.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::account::{Account, AuthSession, PasswordReset};
use crate::domain::activity::{StudyActivity, TutorSession};
use crate::domain::course::{Course, CourseModule};
use crate::domain::enrollment::{Certification, Enrollment};
use crate::domain::id::{
    CourseId, EnrollmentId, ModuleId, NotificationId, ProfileId, QuizId,
};
use crate::domain::notification::Notification;
use crate::domain::pathway::{CareerRecommendation, LearningPathway};
use crate::domain::profile::{Profile, Role};
use crate::domain::quiz::{Quiz, QuizAttempt};
use crate::error::Result;

/// Filter for catalog listings.
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    pub category: Option<String>,
    pub include_inactive: bool,
    pub limit: Option<usize>,
}

/// Course counts by active flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CourseCounts {
    pub active: u64,
    pub inactive: u64,
}

/// Platform-wide enrollment aggregates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnrollmentTotals {
    pub total: u64,
    pub completed: u64,
    pub average_progress: f64,
}

/// A change applied to a freshly read enrollment. Returns `true` when it
/// completed the course.
pub type EnrollmentChange<'a> = &'a (dyn Fn(&mut Enrollment) -> bool + Send + Sync);

/// The enrollment as written, plus the certificate stored alongside it.
#[derive(Debug, Clone)]
pub struct EnrollmentChanged {
    pub enrollment: Enrollment,
    pub certification: Option<Certification>,
}

/// Profiles, credentials and sessions.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account. Fails with `Conflict` if the email is taken.
    async fn insert_account(&self, profile: &Profile, password_hash: &str) -> Result<()>;

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>>;

    async fn get_profile(&self, id: &ProfileId) -> Result<Option<Profile>>;

    async fn update_profile(&self, profile: &Profile) -> Result<()>;

    async fn update_password(&self, id: &ProfileId, password_hash: &str) -> Result<()>;

    /// All profiles, newest first.
    async fn list_profiles(&self) -> Result<Vec<Profile>>;

    async fn count_profiles_by_role(&self) -> Result<Vec<(Role, u64)>>;

    async fn insert_session(&self, session: &AuthSession) -> Result<()>;

    async fn find_session(&self, token_hash: &str) -> Result<Option<AuthSession>>;

    /// Returns whether a session was removed.
    async fn delete_session(&self, token_hash: &str) -> Result<bool>;

    /// Revoke every session of a profile. Returns count deleted.
    async fn delete_sessions_for(&self, id: &ProfileId) -> Result<usize>;

    async fn insert_password_reset(&self, reset: &PasswordReset) -> Result<()>;

    async fn find_password_reset(&self, token_hash: &str) -> Result<Option<PasswordReset>>;

    /// Flip an unused reset token to used. Returns `false` when another
    /// caller already claimed it.
    async fn mark_password_reset_used(&self, token_hash: &str) -> Result<bool>;
}

/// Courses and modules.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn insert_course(&self, course: &Course) -> Result<()>;

    async fn get_course(&self, id: &CourseId) -> Result<Option<Course>>;

    async fn find_course_by_title(&self, title: &str) -> Result<Option<Course>>;

    /// Courses matching `filter`, oldest first.
    async fn list_courses(&self, filter: &CourseFilter) -> Result<Vec<Course>>;

    async fn update_course(&self, course: &Course) -> Result<()>;

    /// Delete a course and everything hanging off it.
    async fn delete_course(&self, id: &CourseId) -> Result<bool>;

    async fn count_courses(&self) -> Result<CourseCounts>;

    async fn insert_module(&self, module: &CourseModule) -> Result<()>;

    async fn get_module(&self, id: &ModuleId) -> Result<Option<CourseModule>>;

    /// Modules of a course by `order_index` ascending.
    async fn list_modules(&self, course_id: &CourseId, include_inactive: bool)
        -> Result<Vec<CourseModule>>;

    /// One past the highest `order_index` in the course, starting at 1.
    async fn next_module_index(&self, course_id: &CourseId) -> Result<i32>;
}

/// Enrollments and certificates.
#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    /// Insert an enrollment. Fails with `Conflict` on a duplicate
    /// (student, course) pair.
    async fn insert_enrollment(&self, enrollment: &Enrollment) -> Result<()>;

    async fn get_enrollment(&self, id: &EnrollmentId) -> Result<Option<Enrollment>>;

    async fn find_enrollment(
        &self,
        student_id: &ProfileId,
        course_id: &CourseId,
    ) -> Result<Option<Enrollment>>;

    /// Enrollments of a student, newest first.
    async fn list_enrollments_for(&self, student_id: &ProfileId) -> Result<Vec<Enrollment>>;

    /// Re-read an enrollment, apply `change` and write it back in one write
    /// transaction. When the change completes the course, `certificate` is
    /// stored in the same transaction unless the (student, course) pair
    /// already holds one. A taken certificate number fails with `Conflict`
    /// and nothing is written.
    async fn change_enrollment(
        &self,
        id: &EnrollmentId,
        change: EnrollmentChange<'_>,
        certificate: &Certification,
    ) -> Result<EnrollmentChanged>;

    async fn delete_enrollment(&self, id: &EnrollmentId) -> Result<bool>;

    async fn enrollment_totals(&self) -> Result<EnrollmentTotals>;

    /// Insert a certificate. Fails with `Conflict` if one already exists for
    /// the (student, course) pair.
    async fn insert_certification(&self, certification: &Certification) -> Result<()>;

    /// Certificates of a student, newest first.
    async fn list_certifications_for(&self, student_id: &ProfileId)
        -> Result<Vec<Certification>>;
}

/// Notifications.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn insert_notification(&self, notification: &Notification) -> Result<()>;

    async fn get_notification(&self, id: &NotificationId) -> Result<Option<Notification>>;

    /// Notifications of a recipient, newest first.
    async fn list_notifications(
        &self,
        recipient_id: &ProfileId,
        unread_only: bool,
    ) -> Result<Vec<Notification>>;

    async fn mark_notification_read(&self, id: &NotificationId) -> Result<()>;

    /// Mark every unread notification read. Returns count updated.
    async fn mark_all_notifications_read(&self, recipient_id: &ProfileId) -> Result<usize>;

    async fn delete_notification(&self, id: &NotificationId) -> Result<bool>;
}

/// Quizzes and attempts.
#[async_trait]
pub trait AssessmentStore: Send + Sync {
    async fn insert_quiz(&self, quiz: &Quiz) -> Result<()>;

    async fn get_quiz(&self, id: &QuizId) -> Result<Option<Quiz>>;

    /// Quizzes of a course, newest first.
    async fn list_quizzes_for_course(&self, course_id: &CourseId) -> Result<Vec<Quiz>>;

    async fn insert_attempt(&self, attempt: &QuizAttempt) -> Result<()>;

    /// Attempts of a student, newest first.
    async fn list_attempts_for(
        &self,
        student_id: &ProfileId,
        limit: Option<usize>,
    ) -> Result<Vec<QuizAttempt>>;

    async fn average_score_for(&self, student_id: &ProfileId) -> Result<Option<f64>>;
}

/// Study activity and tutor transcripts.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    async fn insert_activity(&self, activity: &StudyActivity) -> Result<()>;

    /// Activities on or after `since`, date ascending.
    async fn list_activities_since(
        &self,
        student_id: &ProfileId,
        since: NaiveDate,
    ) -> Result<Vec<StudyActivity>>;

    async fn total_minutes_since(&self, student_id: &ProfileId, since: NaiveDate) -> Result<i64>;

    async fn insert_tutor_session(&self, session: &TutorSession) -> Result<()>;

    async fn count_tutor_sessions(&self, student_id: &ProfileId) -> Result<u64>;
}

/// Career pathways and saved recommendations.
#[async_trait]
pub trait PathwayStore: Send + Sync {
    /// Insert a pathway. Fails with `Conflict` on a duplicate career name.
    async fn insert_pathway(&self, pathway: &LearningPathway) -> Result<()>;

    /// All pathways by career name.
    async fn list_pathways(&self) -> Result<Vec<LearningPathway>>;

    /// Case-insensitive lookup by career name.
    async fn find_pathway_by_name(&self, name: &str) -> Result<Option<LearningPathway>>;

    async fn insert_recommendation(&self, recommendation: &CareerRecommendation) -> Result<()>;

    /// Saved recommendations of a student, newest first.
    async fn list_recommendations_for(
        &self,
        student_id: &ProfileId,
    ) -> Result<Vec<CareerRecommendation>>;
}
