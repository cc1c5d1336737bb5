//! Database model types for Diesel ORM.
//!
//! Rows mirror the table layout one to one. List-valued fields are stored
//! as JSON text and timestamps as RFC 3339 strings; conversion to domain
//! types lives in the store.

use diesel::prelude::*;

use super::schema::{
    ai_tutor_sessions, auth_sessions, career_recommendations, certifications, course_modules,
    courses, enrollments, learning_pathways, notifications, password_resets, profiles,
    quiz_attempts, quizzes, study_activities,
};

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProfileRow {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub password_hash: String,
    pub program: Option<String>,
    pub interests: String,
    pub learning_style: Option<String>,
    pub target_career: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = auth_sessions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AuthSessionRow {
    pub token_hash: String,
    pub profile_id: String,
    pub created_at: String,
    pub expires_at: String,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = password_resets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PasswordResetRow {
    pub token_hash: String,
    pub profile_id: String,
    pub created_at: String,
    pub expires_at: String,
    pub used: bool,
}

#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct CourseRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: String,
    pub duration_hours: f64,
    pub instructor_id: Option<String>,
    pub instructor_name: Option<String>,
    pub tags: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = course_modules)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CourseModuleRow {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub description: String,
    pub video_url: Option<String>,
    pub duration_minutes: i32,
    pub order_index: i32,
    pub content: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = enrollments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct EnrollmentRow {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    pub progress: f64,
    pub status: String,
    pub completed_modules: String,
    pub enrolled_at: String,
    pub last_accessed: Option<String>,
    pub completed_at: Option<String>,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = certifications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CertificationRow {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    pub certificate_number: String,
    pub issued_at: String,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NotificationRow {
    pub id: String,
    pub recipient_id: String,
    pub title: String,
    pub message: String,
    pub due_date: Option<String>,
    pub is_read: bool,
    pub created_at: String,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = quizzes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct QuizRow {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub questions: String,
    pub created_by: String,
    pub created_at: String,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = quiz_attempts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct QuizAttemptRow {
    pub id: String,
    pub student_id: String,
    pub quiz_id: String,
    pub answers: String,
    pub score: f64,
    pub completed_at: String,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = study_activities)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StudyActivityRow {
    pub id: String,
    pub student_id: String,
    pub course_id: Option<String>,
    pub date: String,
    pub minutes: i32,
    pub created_at: String,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = ai_tutor_sessions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TutorSessionRow {
    pub id: String,
    pub student_id: String,
    pub course_id: Option<String>,
    pub conversation: String,
    pub topic_covered: String,
    pub source: String,
    pub created_at: String,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = learning_pathways)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LearningPathwayRow {
    pub id: String,
    pub career_name: String,
    pub description: String,
    pub salary_range: String,
    pub recommended_courses: String,
    pub recommended_certs: String,
    pub recommended_skills: String,
    pub job_outlook: String,
    pub created_at: String,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = career_recommendations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CareerRecommendationRow {
    pub id: String,
    pub student_id: String,
    pub kind: String,
    pub title: String,
    pub reason: String,
    pub created_at: String,
}
