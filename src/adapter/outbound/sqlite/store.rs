//! SQLite store implementation.
//!
//! Provides persistent storage for every aggregate of the platform using
//! SQLite and Diesel ORM. Rows are converted to and from domain types here
//! so nothing above the adapter sees JSON columns or timestamp strings.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use diesel::dsl::{avg, count_star, max, sum};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::result::DatabaseErrorKind;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::database::connection::DbPool;
use super::database::model::{
    AuthSessionRow, CareerRecommendationRow, CertificationRow, CourseModuleRow, CourseRow,
    EnrollmentRow, LearningPathwayRow, NotificationRow, PasswordResetRow, ProfileRow,
    QuizAttemptRow, QuizRow, StudyActivityRow, TutorSessionRow,
};
use super::database::schema::{
    ai_tutor_sessions, auth_sessions, career_recommendations, certifications, course_modules,
    courses, enrollments, learning_pathways, notifications, password_resets, profiles,
    quiz_attempts, quizzes, study_activities,
};
use crate::domain::account::{Account, AuthSession, PasswordReset};
use crate::domain::activity::{StudyActivity, TutorSession};
use crate::domain::course::{Course, CourseModule};
use crate::domain::enrollment::{Certification, Enrollment};
use crate::domain::id::{CourseId, EnrollmentId, ModuleId, NotificationId, ProfileId, QuizId};
use crate::domain::notification::Notification;
use crate::domain::pathway::{CareerRecommendation, LearningPathway};
use crate::domain::profile::{Profile, Role};
use crate::domain::quiz::{Quiz, QuizAttempt};
use crate::error::{Error, Result};
use crate::port::outbound::store::{
    AccountStore, ActivityStore, AssessmentStore, CatalogStore, CourseCounts, CourseFilter,
    EnrollmentChange, EnrollmentChanged, EnrollmentStore, EnrollmentTotals, NotificationStore,
    PathwayStore,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

type Conn = PooledConnection<ConnectionManager<SqliteConnection>>;

/// SQLite-backed store for every aggregate.
#[derive(Clone)]
pub struct SqliteStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteStore {
    /// Create a new SQLite store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<Conn> {
        self.pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))
    }
}

// Timestamps use a fixed-width UTC form so text ordering matches time ordering.
fn ts(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_ts(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Parse(format!("timestamp {value:?}: {e}")))
}

fn parse_opt_ts(value: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    value.map(parse_ts).transpose()
}

fn day(value: &NaiveDate) -> String {
    value.format(DATE_FORMAT).to_string()
}

fn parse_day(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| Error::Parse(format!("date {value:?}: {e}")))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::Parse(e.to_string()))
}

fn from_json<T: DeserializeOwned>(value: &str) -> Result<T> {
    serde_json::from_str(value).map_err(|e| Error::Parse(e.to_string()))
}

fn parse_enum<T>(value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| Error::Parse(e.to_string()))
}

fn db_err(e: diesel::result::Error) -> Error {
    Error::Database(e.to_string())
}

/// Map a failed write, turning unique-constraint violations into conflicts.
fn write_err(what: &str) -> impl FnOnce(diesel::result::Error) -> Error + '_ {
    move |e| match e {
        diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            Error::Conflict(format!("{what} already exists"))
        }
        other => db_err(other),
    }
}

fn count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

fn limit(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl ProfileRow {
    fn from_domain(profile: &Profile, password_hash: &str) -> Result<Self> {
        Ok(Self {
            id: profile.id.to_string(),
            email: profile.email.clone(),
            full_name: profile.full_name.clone(),
            role: profile.role.as_str().to_string(),
            password_hash: password_hash.to_string(),
            program: profile.program.clone(),
            interests: to_json(&profile.interests)?,
            learning_style: profile.learning_style.clone(),
            target_career: profile.target_career.clone(),
            created_at: ts(&profile.created_at),
            updated_at: ts(&profile.updated_at),
        })
    }

    fn into_account(self) -> Result<Account> {
        let password_hash = self.password_hash.clone();
        Ok(Account {
            profile: self.into_profile()?,
            password_hash,
        })
    }

    fn into_profile(self) -> Result<Profile> {
        Ok(Profile {
            id: ProfileId::from(self.id),
            email: self.email,
            full_name: self.full_name,
            role: parse_enum(&self.role)?,
            program: self.program,
            interests: from_json(&self.interests)?,
            learning_style: self.learning_style,
            target_career: self.target_career,
            created_at: parse_ts(&self.created_at)?,
            updated_at: parse_ts(&self.updated_at)?,
        })
    }
}

impl AuthSessionRow {
    fn from_domain(session: &AuthSession) -> Self {
        Self {
            token_hash: session.token_hash.clone(),
            profile_id: session.profile_id.to_string(),
            created_at: ts(&session.created_at),
            expires_at: ts(&session.expires_at),
        }
    }

    fn into_domain(self) -> Result<AuthSession> {
        Ok(AuthSession {
            token_hash: self.token_hash,
            profile_id: ProfileId::from(self.profile_id),
            created_at: parse_ts(&self.created_at)?,
            expires_at: parse_ts(&self.expires_at)?,
        })
    }
}

impl PasswordResetRow {
    fn from_domain(reset: &PasswordReset) -> Self {
        Self {
            token_hash: reset.token_hash.clone(),
            profile_id: reset.profile_id.to_string(),
            created_at: ts(&reset.created_at),
            expires_at: ts(&reset.expires_at),
            used: reset.used,
        }
    }

    fn into_domain(self) -> Result<PasswordReset> {
        Ok(PasswordReset {
            token_hash: self.token_hash,
            profile_id: ProfileId::from(self.profile_id),
            created_at: parse_ts(&self.created_at)?,
            expires_at: parse_ts(&self.expires_at)?,
            used: self.used,
        })
    }
}

impl CourseRow {
    fn from_domain(course: &Course) -> Result<Self> {
        Ok(Self {
            id: course.id.to_string(),
            title: course.title.clone(),
            description: course.description.clone(),
            category: course.category.clone(),
            difficulty: course.difficulty.as_str().to_string(),
            duration_hours: course.duration_hours,
            instructor_id: course.instructor_id.as_ref().map(ToString::to_string),
            instructor_name: course.instructor_name.clone(),
            tags: to_json(&course.tags)?,
            is_active: course.is_active,
            created_at: ts(&course.created_at),
            updated_at: ts(&course.updated_at),
        })
    }

    fn into_domain(self) -> Result<Course> {
        Ok(Course {
            id: CourseId::from(self.id),
            title: self.title,
            description: self.description,
            category: self.category,
            difficulty: parse_enum(&self.difficulty)?,
            duration_hours: self.duration_hours,
            instructor_id: self.instructor_id.map(ProfileId::from),
            instructor_name: self.instructor_name,
            tags: from_json(&self.tags)?,
            is_active: self.is_active,
            created_at: parse_ts(&self.created_at)?,
            updated_at: parse_ts(&self.updated_at)?,
        })
    }
}

impl CourseModuleRow {
    fn from_domain(module: &CourseModule) -> Self {
        Self {
            id: module.id.to_string(),
            course_id: module.course_id.to_string(),
            title: module.title.clone(),
            description: module.description.clone(),
            video_url: module.video_url.clone(),
            duration_minutes: module.duration_minutes,
            order_index: module.order_index,
            content: module.content.clone(),
            is_active: module.is_active,
            created_at: ts(&module.created_at),
        }
    }

    fn into_domain(self) -> Result<CourseModule> {
        Ok(CourseModule {
            id: ModuleId::from(self.id),
            course_id: CourseId::from(self.course_id),
            title: self.title,
            description: self.description,
            video_url: self.video_url,
            duration_minutes: self.duration_minutes,
            order_index: self.order_index,
            content: self.content,
            is_active: self.is_active,
            created_at: parse_ts(&self.created_at)?,
        })
    }
}

impl EnrollmentRow {
    fn from_domain(enrollment: &Enrollment) -> Result<Self> {
        Ok(Self {
            id: enrollment.id.to_string(),
            student_id: enrollment.student_id.to_string(),
            course_id: enrollment.course_id.to_string(),
            progress: enrollment.progress,
            status: enrollment.status.as_str().to_string(),
            completed_modules: to_json(&enrollment.completed_modules)?,
            enrolled_at: ts(&enrollment.enrolled_at),
            last_accessed: enrollment.last_accessed.as_ref().map(ts),
            completed_at: enrollment.completed_at.as_ref().map(ts),
        })
    }

    fn into_domain(self) -> Result<Enrollment> {
        Ok(Enrollment {
            id: EnrollmentId::from(self.id),
            student_id: ProfileId::from(self.student_id),
            course_id: CourseId::from(self.course_id),
            progress: self.progress,
            status: parse_enum(&self.status)?,
            completed_modules: from_json(&self.completed_modules)?,
            enrolled_at: parse_ts(&self.enrolled_at)?,
            last_accessed: parse_opt_ts(self.last_accessed.as_deref())?,
            completed_at: parse_opt_ts(self.completed_at.as_deref())?,
        })
    }
}

impl CertificationRow {
    fn from_domain(cert: &Certification) -> Self {
        Self {
            id: cert.id.to_string(),
            student_id: cert.student_id.to_string(),
            course_id: cert.course_id.to_string(),
            certificate_number: cert.certificate_number.clone(),
            issued_at: ts(&cert.issued_at),
        }
    }

    fn into_domain(self) -> Result<Certification> {
        Ok(Certification {
            id: self.id.into(),
            student_id: ProfileId::from(self.student_id),
            course_id: CourseId::from(self.course_id),
            certificate_number: self.certificate_number,
            issued_at: parse_ts(&self.issued_at)?,
        })
    }
}

impl NotificationRow {
    fn from_domain(notification: &Notification) -> Self {
        Self {
            id: notification.id.to_string(),
            recipient_id: notification.recipient_id.to_string(),
            title: notification.title.clone(),
            message: notification.message.clone(),
            due_date: notification.due_date.as_ref().map(day),
            is_read: notification.is_read,
            created_at: ts(&notification.created_at),
        }
    }

    fn into_domain(self) -> Result<Notification> {
        Ok(Notification {
            id: NotificationId::from(self.id),
            recipient_id: ProfileId::from(self.recipient_id),
            title: self.title,
            message: self.message,
            due_date: self.due_date.as_deref().map(parse_day).transpose()?,
            is_read: self.is_read,
            created_at: parse_ts(&self.created_at)?,
        })
    }
}

impl QuizRow {
    fn from_domain(quiz: &Quiz) -> Result<Self> {
        Ok(Self {
            id: quiz.id.to_string(),
            course_id: quiz.course_id.to_string(),
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            difficulty: quiz.difficulty.as_str().to_string(),
            questions: to_json(&quiz.questions)?,
            created_by: quiz.created_by.to_string(),
            created_at: ts(&quiz.created_at),
        })
    }

    fn into_domain(self) -> Result<Quiz> {
        Ok(Quiz {
            id: QuizId::from(self.id),
            course_id: CourseId::from(self.course_id),
            title: self.title,
            description: self.description,
            difficulty: parse_enum(&self.difficulty)?,
            questions: from_json(&self.questions)?,
            created_by: ProfileId::from(self.created_by),
            created_at: parse_ts(&self.created_at)?,
        })
    }
}

impl QuizAttemptRow {
    fn from_domain(attempt: &QuizAttempt) -> Result<Self> {
        Ok(Self {
            id: attempt.id.to_string(),
            student_id: attempt.student_id.to_string(),
            quiz_id: attempt.quiz_id.to_string(),
            answers: to_json(&attempt.answers)?,
            score: attempt.score,
            completed_at: ts(&attempt.completed_at),
        })
    }

    fn into_domain(self) -> Result<QuizAttempt> {
        Ok(QuizAttempt {
            id: self.id.into(),
            student_id: ProfileId::from(self.student_id),
            quiz_id: QuizId::from(self.quiz_id),
            answers: from_json(&self.answers)?,
            score: self.score,
            completed_at: parse_ts(&self.completed_at)?,
        })
    }
}

impl StudyActivityRow {
    fn from_domain(activity: &StudyActivity) -> Self {
        Self {
            id: activity.id.to_string(),
            student_id: activity.student_id.to_string(),
            course_id: activity.course_id.as_ref().map(ToString::to_string),
            date: day(&activity.date),
            minutes: activity.minutes,
            created_at: ts(&activity.created_at),
        }
    }

    fn into_domain(self) -> Result<StudyActivity> {
        Ok(StudyActivity {
            id: self.id.into(),
            student_id: ProfileId::from(self.student_id),
            course_id: self.course_id.map(CourseId::from),
            date: parse_day(&self.date)?,
            minutes: self.minutes,
            created_at: parse_ts(&self.created_at)?,
        })
    }
}

impl TutorSessionRow {
    fn from_domain(session: &TutorSession) -> Result<Self> {
        Ok(Self {
            id: session.id.to_string(),
            student_id: session.student_id.to_string(),
            course_id: session.course_id.as_ref().map(ToString::to_string),
            conversation: to_json(&session.conversation)?,
            topic_covered: session.topic_covered.clone(),
            source: session.source.as_str().to_string(),
            created_at: ts(&session.created_at),
        })
    }
}

impl LearningPathwayRow {
    fn from_domain(pathway: &LearningPathway) -> Result<Self> {
        Ok(Self {
            id: pathway.id.to_string(),
            career_name: pathway.career_name.clone(),
            description: pathway.description.clone(),
            salary_range: pathway.salary_range.clone(),
            recommended_courses: to_json(&pathway.recommended_courses)?,
            recommended_certs: to_json(&pathway.recommended_certs)?,
            recommended_skills: to_json(&pathway.recommended_skills)?,
            job_outlook: pathway.job_outlook.clone(),
            created_at: ts(&pathway.created_at),
        })
    }

    fn into_domain(self) -> Result<LearningPathway> {
        Ok(LearningPathway {
            id: self.id.into(),
            career_name: self.career_name,
            description: self.description,
            salary_range: self.salary_range,
            recommended_courses: from_json(&self.recommended_courses)?,
            recommended_certs: from_json(&self.recommended_certs)?,
            recommended_skills: from_json(&self.recommended_skills)?,
            job_outlook: self.job_outlook,
            created_at: parse_ts(&self.created_at)?,
        })
    }
}

impl CareerRecommendationRow {
    fn from_domain(rec: &CareerRecommendation) -> Self {
        Self {
            id: rec.id.to_string(),
            student_id: rec.student_id.to_string(),
            kind: rec.kind.as_str().to_string(),
            title: rec.title.clone(),
            reason: rec.reason.clone(),
            created_at: ts(&rec.created_at),
        }
    }

    fn into_domain(self) -> Result<CareerRecommendation> {
        Ok(CareerRecommendation {
            id: self.id.into(),
            student_id: ProfileId::from(self.student_id),
            kind: parse_enum(&self.kind)?,
            title: self.title,
            reason: self.reason,
            created_at: parse_ts(&self.created_at)?,
        })
    }
}

#[async_trait::async_trait]
impl AccountStore for SqliteStore {
    async fn insert_account(&self, profile: &Profile, password_hash: &str) -> Result<()> {
        let row = ProfileRow::from_domain(profile, password_hash)?;
        let mut conn = self.conn()?;
        diesel::insert_into(profiles::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(write_err("an account with this email"))?;
        Ok(())
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        let mut conn = self.conn()?;
        let row: Option<ProfileRow> = profiles::table
            .filter(profiles::email.eq(email))
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db_err)?;
        row.map(ProfileRow::into_account).transpose()
    }

    async fn get_profile(&self, id: &ProfileId) -> Result<Option<Profile>> {
        let mut conn = self.conn()?;
        let row: Option<ProfileRow> = profiles::table
            .find(id.as_str())
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db_err)?;
        row.map(ProfileRow::into_profile).transpose()
    }

    async fn update_profile(&self, profile: &Profile) -> Result<()> {
        let interests = to_json(&profile.interests)?;
        let mut conn = self.conn()?;
        let updated = diesel::update(profiles::table.find(profile.id.as_str()))
            .set((
                profiles::full_name.eq(&profile.full_name),
                profiles::role.eq(profile.role.as_str()),
                profiles::program.eq(profile.program.as_deref()),
                profiles::interests.eq(&interests),
                profiles::learning_style.eq(profile.learning_style.as_deref()),
                profiles::target_career.eq(profile.target_career.as_deref()),
                profiles::updated_at.eq(ts(&profile.updated_at)),
            ))
            .execute(&mut conn)
            .map_err(db_err)?;
        if updated == 0 {
            return Err(Error::not_found("profile", &profile.id));
        }
        Ok(())
    }

    async fn update_password(&self, id: &ProfileId, password_hash: &str) -> Result<()> {
        let mut conn = self.conn()?;
        let updated = diesel::update(profiles::table.find(id.as_str()))
            .set((
                profiles::password_hash.eq(password_hash),
                profiles::updated_at.eq(ts(&Utc::now())),
            ))
            .execute(&mut conn)
            .map_err(db_err)?;
        if updated == 0 {
            return Err(Error::not_found("profile", id));
        }
        Ok(())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>> {
        let mut conn = self.conn()?;
        let rows: Vec<ProfileRow> = profiles::table
            .order((profiles::created_at.desc(), profiles::id.desc()))
            .select(ProfileRow::as_select())
            .load(&mut conn)
            .map_err(db_err)?;
        rows.into_iter().map(ProfileRow::into_profile).collect()
    }

    async fn count_profiles_by_role(&self) -> Result<Vec<(Role, u64)>> {
        let mut conn = self.conn()?;
        let rows: Vec<(String, i64)> = profiles::table
            .group_by(profiles::role)
            .select((profiles::role, count_star()))
            .load(&mut conn)
            .map_err(db_err)?;

        Ok(Role::ALL
            .iter()
            .map(|role| {
                let n = rows
                    .iter()
                    .find(|(name, _)| name == role.as_str())
                    .map_or(0, |(_, n)| count(*n));
                (*role, n)
            })
            .collect())
    }

    async fn insert_session(&self, session: &AuthSession) -> Result<()> {
        let row = AuthSessionRow::from_domain(session);
        let mut conn = self.conn()?;
        diesel::insert_into(auth_sessions::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(write_err("session"))?;
        Ok(())
    }

    async fn find_session(&self, token_hash: &str) -> Result<Option<AuthSession>> {
        let mut conn = self.conn()?;
        let row: Option<AuthSessionRow> = auth_sessions::table
            .find(token_hash)
            .select(AuthSessionRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db_err)?;
        row.map(AuthSessionRow::into_domain).transpose()
    }

    async fn delete_session(&self, token_hash: &str) -> Result<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(auth_sessions::table.find(token_hash))
            .execute(&mut conn)
            .map_err(db_err)?;
        Ok(deleted > 0)
    }

    async fn delete_sessions_for(&self, id: &ProfileId) -> Result<usize> {
        let mut conn = self.conn()?;
        diesel::delete(auth_sessions::table.filter(auth_sessions::profile_id.eq(id.as_str())))
            .execute(&mut conn)
            .map_err(db_err)
    }

    async fn insert_password_reset(&self, reset: &PasswordReset) -> Result<()> {
        let row = PasswordResetRow::from_domain(reset);
        let mut conn = self.conn()?;
        diesel::insert_into(password_resets::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(write_err("reset token"))?;
        Ok(())
    }

    async fn find_password_reset(&self, token_hash: &str) -> Result<Option<PasswordReset>> {
        let mut conn = self.conn()?;
        let row: Option<PasswordResetRow> = password_resets::table
            .find(token_hash)
            .select(PasswordResetRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db_err)?;
        row.map(PasswordResetRow::into_domain).transpose()
    }

    async fn mark_password_reset_used(&self, token_hash: &str) -> Result<bool> {
        let mut conn = self.conn()?;
        let claimed = diesel::update(
            password_resets::table
                .find(token_hash)
                .filter(password_resets::used.eq(false)),
        )
        .set(password_resets::used.eq(true))
        .execute(&mut conn)
        .map_err(db_err)?;
        Ok(claimed == 1)
    }
}

#[async_trait::async_trait]
impl CatalogStore for SqliteStore {
    async fn insert_course(&self, course: &Course) -> Result<()> {
        let row = CourseRow::from_domain(course)?;
        let mut conn = self.conn()?;
        diesel::insert_into(courses::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(write_err("course"))?;
        Ok(())
    }

    async fn get_course(&self, id: &CourseId) -> Result<Option<Course>> {
        let mut conn = self.conn()?;
        let row: Option<CourseRow> = courses::table
            .find(id.as_str())
            .select(CourseRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db_err)?;
        row.map(CourseRow::into_domain).transpose()
    }

    async fn find_course_by_title(&self, title: &str) -> Result<Option<Course>> {
        let mut conn = self.conn()?;
        let row: Option<CourseRow> = courses::table
            .filter(courses::title.eq(title))
            .order(courses::created_at.asc())
            .select(CourseRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db_err)?;
        row.map(CourseRow::into_domain).transpose()
    }

    async fn list_courses(&self, filter: &CourseFilter) -> Result<Vec<Course>> {
        let mut conn = self.conn()?;
        let mut query = courses::table
            .select(CourseRow::as_select())
            .order((courses::created_at.asc(), courses::id.asc()))
            .into_boxed();
        if let Some(category) = &filter.category {
            query = query.filter(courses::category.eq(category.clone()));
        }
        if !filter.include_inactive {
            query = query.filter(courses::is_active.eq(true));
        }
        if let Some(n) = filter.limit {
            query = query.limit(limit(n));
        }
        let rows: Vec<CourseRow> = query.load(&mut conn).map_err(db_err)?;
        rows.into_iter().map(CourseRow::into_domain).collect()
    }

    async fn update_course(&self, course: &Course) -> Result<()> {
        let row = CourseRow::from_domain(course)?;
        let mut conn = self.conn()?;
        let updated = diesel::update(courses::table.find(course.id.as_str()))
            .set(&row)
            .execute(&mut conn)
            .map_err(db_err)?;
        if updated == 0 {
            return Err(Error::not_found("course", &course.id));
        }
        Ok(())
    }

    async fn delete_course(&self, id: &CourseId) -> Result<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(courses::table.find(id.as_str()))
            .execute(&mut conn)
            .map_err(db_err)?;
        Ok(deleted > 0)
    }

    async fn count_courses(&self) -> Result<CourseCounts> {
        let mut conn = self.conn()?;
        let rows: Vec<(bool, i64)> = courses::table
            .group_by(courses::is_active)
            .select((courses::is_active, count_star()))
            .load(&mut conn)
            .map_err(db_err)?;
        let mut counts = CourseCounts::default();
        for (active, n) in rows {
            if active {
                counts.active = count(n);
            } else {
                counts.inactive = count(n);
            }
        }
        Ok(counts)
    }

    async fn insert_module(&self, module: &CourseModule) -> Result<()> {
        let row = CourseModuleRow::from_domain(module);
        let mut conn = self.conn()?;
        diesel::insert_into(course_modules::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(write_err("module"))?;
        Ok(())
    }

    async fn get_module(&self, id: &ModuleId) -> Result<Option<CourseModule>> {
        let mut conn = self.conn()?;
        let row: Option<CourseModuleRow> = course_modules::table
            .find(id.as_str())
            .select(CourseModuleRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db_err)?;
        row.map(CourseModuleRow::into_domain).transpose()
    }

    async fn list_modules(
        &self,
        course_id: &CourseId,
        include_inactive: bool,
    ) -> Result<Vec<CourseModule>> {
        let mut conn = self.conn()?;
        let mut query = course_modules::table
            .filter(course_modules::course_id.eq(course_id.as_str().to_string()))
            .select(CourseModuleRow::as_select())
            .order((course_modules::order_index.asc(), course_modules::created_at.asc()))
            .into_boxed();
        if !include_inactive {
            query = query.filter(course_modules::is_active.eq(true));
        }
        let rows: Vec<CourseModuleRow> = query.load(&mut conn).map_err(db_err)?;
        rows.into_iter().map(CourseModuleRow::into_domain).collect()
    }

    async fn next_module_index(&self, course_id: &CourseId) -> Result<i32> {
        let mut conn = self.conn()?;
        let highest: Option<i32> = course_modules::table
            .filter(course_modules::course_id.eq(course_id.as_str()))
            .select(max(course_modules::order_index))
            .first(&mut conn)
            .map_err(db_err)?;
        Ok(highest.map_or(1, |n| n + 1))
    }
}

#[async_trait::async_trait]
impl EnrollmentStore for SqliteStore {
    async fn insert_enrollment(&self, enrollment: &Enrollment) -> Result<()> {
        let row = EnrollmentRow::from_domain(enrollment)?;
        let mut conn = self.conn()?;
        diesel::insert_into(enrollments::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(write_err("enrollment in this course"))?;
        Ok(())
    }

    async fn get_enrollment(&self, id: &EnrollmentId) -> Result<Option<Enrollment>> {
        let mut conn = self.conn()?;
        let row: Option<EnrollmentRow> = enrollments::table
            .find(id.as_str())
            .select(EnrollmentRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db_err)?;
        row.map(EnrollmentRow::into_domain).transpose()
    }

    async fn find_enrollment(
        &self,
        student_id: &ProfileId,
        course_id: &CourseId,
    ) -> Result<Option<Enrollment>> {
        let mut conn = self.conn()?;
        let row: Option<EnrollmentRow> = enrollments::table
            .filter(enrollments::student_id.eq(student_id.as_str()))
            .filter(enrollments::course_id.eq(course_id.as_str()))
            .select(EnrollmentRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db_err)?;
        row.map(EnrollmentRow::into_domain).transpose()
    }

    async fn list_enrollments_for(&self, student_id: &ProfileId) -> Result<Vec<Enrollment>> {
        let mut conn = self.conn()?;
        let rows: Vec<EnrollmentRow> = enrollments::table
            .filter(enrollments::student_id.eq(student_id.as_str()))
            .order((enrollments::enrolled_at.desc(), enrollments::id.desc()))
            .select(EnrollmentRow::as_select())
            .load(&mut conn)
            .map_err(db_err)?;
        rows.into_iter().map(EnrollmentRow::into_domain).collect()
    }

    async fn change_enrollment(
        &self,
        id: &EnrollmentId,
        change: EnrollmentChange<'_>,
        certificate: &Certification,
    ) -> Result<EnrollmentChanged> {
        let mut conn = self.conn()?;
        conn.immediate_transaction::<_, Error, _>(|conn| {
            let row: Option<EnrollmentRow> = enrollments::table
                .find(id.as_str())
                .select(EnrollmentRow::as_select())
                .first(conn)
                .optional()
                .map_err(db_err)?;
            let mut enrollment = row
                .ok_or_else(|| Error::not_found("enrollment", id))?
                .into_domain()?;

            let completed = change(&mut enrollment);
            diesel::update(enrollments::table.find(id.as_str()))
                .set(&EnrollmentRow::from_domain(&enrollment)?)
                .execute(conn)
                .map_err(db_err)?;
            if !completed {
                return Ok(EnrollmentChanged {
                    enrollment,
                    certification: None,
                });
            }

            let issued: i64 = certifications::table
                .filter(certifications::student_id.eq(enrollment.student_id.as_str()))
                .filter(certifications::course_id.eq(enrollment.course_id.as_str()))
                .count()
                .get_result(conn)
                .map_err(db_err)?;
            if issued > 0 {
                return Ok(EnrollmentChanged {
                    enrollment,
                    certification: None,
                });
            }
            diesel::insert_into(certifications::table)
                .values(&CertificationRow::from_domain(certificate))
                .execute(conn)
                .map_err(write_err("certificate number"))?;
            Ok(EnrollmentChanged {
                enrollment,
                certification: Some(certificate.clone()),
            })
        })
    }

    async fn delete_enrollment(&self, id: &EnrollmentId) -> Result<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(enrollments::table.find(id.as_str()))
            .execute(&mut conn)
            .map_err(db_err)?;
        Ok(deleted > 0)
    }

    async fn enrollment_totals(&self) -> Result<EnrollmentTotals> {
        let mut conn = self.conn()?;
        let total: i64 = enrollments::table
            .count()
            .get_result(&mut conn)
            .map_err(db_err)?;
        let completed: i64 = enrollments::table
            .filter(enrollments::status.eq("completed"))
            .count()
            .get_result(&mut conn)
            .map_err(db_err)?;
        let average: Option<f64> = enrollments::table
            .select(avg(enrollments::progress))
            .first(&mut conn)
            .map_err(db_err)?;
        Ok(EnrollmentTotals {
            total: count(total),
            completed: count(completed),
            average_progress: crate::domain::round_tenth(average.unwrap_or(0.0)),
        })
    }

    async fn insert_certification(&self, certification: &Certification) -> Result<()> {
        let row = CertificationRow::from_domain(certification);
        let mut conn = self.conn()?;
        diesel::insert_into(certifications::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(write_err("certificate for this course"))?;
        Ok(())
    }

    async fn list_certifications_for(
        &self,
        student_id: &ProfileId,
    ) -> Result<Vec<Certification>> {
        let mut conn = self.conn()?;
        let rows: Vec<CertificationRow> = certifications::table
            .filter(certifications::student_id.eq(student_id.as_str()))
            .order(certifications::issued_at.desc())
            .select(CertificationRow::as_select())
            .load(&mut conn)
            .map_err(db_err)?;
        rows.into_iter().map(CertificationRow::into_domain).collect()
    }
}

#[async_trait::async_trait]
impl NotificationStore for SqliteStore {
    async fn insert_notification(&self, notification: &Notification) -> Result<()> {
        let row = NotificationRow::from_domain(notification);
        let mut conn = self.conn()?;
        diesel::insert_into(notifications::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(write_err("notification"))?;
        Ok(())
    }

    async fn get_notification(&self, id: &NotificationId) -> Result<Option<Notification>> {
        let mut conn = self.conn()?;
        let row: Option<NotificationRow> = notifications::table
            .find(id.as_str())
            .select(NotificationRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db_err)?;
        row.map(NotificationRow::into_domain).transpose()
    }

    async fn list_notifications(
        &self,
        recipient_id: &ProfileId,
        unread_only: bool,
    ) -> Result<Vec<Notification>> {
        let mut conn = self.conn()?;
        let mut query = notifications::table
            .filter(notifications::recipient_id.eq(recipient_id.as_str().to_string()))
            .select(NotificationRow::as_select())
            .order((notifications::created_at.desc(), notifications::id.desc()))
            .into_boxed();
        if unread_only {
            query = query.filter(notifications::is_read.eq(false));
        }
        let rows: Vec<NotificationRow> = query.load(&mut conn).map_err(db_err)?;
        rows.into_iter().map(NotificationRow::into_domain).collect()
    }

    async fn mark_notification_read(&self, id: &NotificationId) -> Result<()> {
        let mut conn = self.conn()?;
        let updated = diesel::update(notifications::table.find(id.as_str()))
            .set(notifications::is_read.eq(true))
            .execute(&mut conn)
            .map_err(db_err)?;
        if updated == 0 {
            return Err(Error::not_found("notification", id));
        }
        Ok(())
    }

    async fn mark_all_notifications_read(&self, recipient_id: &ProfileId) -> Result<usize> {
        let mut conn = self.conn()?;
        diesel::update(
            notifications::table
                .filter(notifications::recipient_id.eq(recipient_id.as_str()))
                .filter(notifications::is_read.eq(false)),
        )
        .set(notifications::is_read.eq(true))
        .execute(&mut conn)
        .map_err(db_err)
    }

    async fn delete_notification(&self, id: &NotificationId) -> Result<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(notifications::table.find(id.as_str()))
            .execute(&mut conn)
            .map_err(db_err)?;
        Ok(deleted > 0)
    }
}

#[async_trait::async_trait]
impl AssessmentStore for SqliteStore {
    async fn insert_quiz(&self, quiz: &Quiz) -> Result<()> {
        let row = QuizRow::from_domain(quiz)?;
        let mut conn = self.conn()?;
        diesel::insert_into(quizzes::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(write_err("quiz"))?;
        Ok(())
    }

    async fn get_quiz(&self, id: &QuizId) -> Result<Option<Quiz>> {
        let mut conn = self.conn()?;
        let row: Option<QuizRow> = quizzes::table
            .find(id.as_str())
            .select(QuizRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db_err)?;
        row.map(QuizRow::into_domain).transpose()
    }

    async fn list_quizzes_for_course(&self, course_id: &CourseId) -> Result<Vec<Quiz>> {
        let mut conn = self.conn()?;
        let rows: Vec<QuizRow> = quizzes::table
            .filter(quizzes::course_id.eq(course_id.as_str()))
            .order((quizzes::created_at.desc(), quizzes::id.desc()))
            .select(QuizRow::as_select())
            .load(&mut conn)
            .map_err(db_err)?;
        rows.into_iter().map(QuizRow::into_domain).collect()
    }

    async fn insert_attempt(&self, attempt: &QuizAttempt) -> Result<()> {
        let row = QuizAttemptRow::from_domain(attempt)?;
        let mut conn = self.conn()?;
        diesel::insert_into(quiz_attempts::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(write_err("attempt"))?;
        Ok(())
    }

    async fn list_attempts_for(
        &self,
        student_id: &ProfileId,
        max_rows: Option<usize>,
    ) -> Result<Vec<QuizAttempt>> {
        let mut conn = self.conn()?;
        let mut query = quiz_attempts::table
            .filter(quiz_attempts::student_id.eq(student_id.as_str().to_string()))
            .select(QuizAttemptRow::as_select())
            .order((quiz_attempts::completed_at.desc(), quiz_attempts::id.desc()))
            .into_boxed();
        if let Some(n) = max_rows {
            query = query.limit(limit(n));
        }
        let rows: Vec<QuizAttemptRow> = query.load(&mut conn).map_err(db_err)?;
        rows.into_iter().map(QuizAttemptRow::into_domain).collect()
    }

    async fn average_score_for(&self, student_id: &ProfileId) -> Result<Option<f64>> {
        let mut conn = self.conn()?;
        quiz_attempts::table
            .filter(quiz_attempts::student_id.eq(student_id.as_str()))
            .select(avg(quiz_attempts::score))
            .first(&mut conn)
            .map_err(db_err)
    }
}

#[async_trait::async_trait]
impl ActivityStore for SqliteStore {
    async fn insert_activity(&self, activity: &StudyActivity) -> Result<()> {
        let row = StudyActivityRow::from_domain(activity);
        let mut conn = self.conn()?;
        diesel::insert_into(study_activities::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(write_err("study activity"))?;
        Ok(())
    }

    async fn list_activities_since(
        &self,
        student_id: &ProfileId,
        since: NaiveDate,
    ) -> Result<Vec<StudyActivity>> {
        let mut conn = self.conn()?;
        let rows: Vec<StudyActivityRow> = study_activities::table
            .filter(study_activities::student_id.eq(student_id.as_str()))
            .filter(study_activities::date.ge(day(&since)))
            .order((study_activities::date.asc(), study_activities::created_at.asc()))
            .select(StudyActivityRow::as_select())
            .load(&mut conn)
            .map_err(db_err)?;
        rows.into_iter().map(StudyActivityRow::into_domain).collect()
    }

    async fn total_minutes_since(&self, student_id: &ProfileId, since: NaiveDate) -> Result<i64> {
        let mut conn = self.conn()?;
        let total: Option<i64> = study_activities::table
            .filter(study_activities::student_id.eq(student_id.as_str()))
            .filter(study_activities::date.ge(day(&since)))
            .select(sum(study_activities::minutes))
            .first(&mut conn)
            .map_err(db_err)?;
        Ok(total.unwrap_or(0))
    }

    async fn insert_tutor_session(&self, session: &TutorSession) -> Result<()> {
        let row = TutorSessionRow::from_domain(session)?;
        let mut conn = self.conn()?;
        diesel::insert_into(ai_tutor_sessions::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(write_err("tutor session"))?;
        Ok(())
    }

    async fn count_tutor_sessions(&self, student_id: &ProfileId) -> Result<u64> {
        let mut conn = self.conn()?;
        let n: i64 = ai_tutor_sessions::table
            .filter(ai_tutor_sessions::student_id.eq(student_id.as_str()))
            .count()
            .get_result(&mut conn)
            .map_err(db_err)?;
        Ok(count(n))
    }
}

#[async_trait::async_trait]
impl PathwayStore for SqliteStore {
    async fn insert_pathway(&self, pathway: &LearningPathway) -> Result<()> {
        let row = LearningPathwayRow::from_domain(pathway)?;
        let mut conn = self.conn()?;
        diesel::insert_into(learning_pathways::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(write_err("pathway"))?;
        Ok(())
    }

    async fn list_pathways(&self) -> Result<Vec<LearningPathway>> {
        let mut conn = self.conn()?;
        let rows: Vec<LearningPathwayRow> = learning_pathways::table
            .order(learning_pathways::career_name.asc())
            .select(LearningPathwayRow::as_select())
            .load(&mut conn)
            .map_err(db_err)?;
        rows.into_iter().map(LearningPathwayRow::into_domain).collect()
    }

    async fn find_pathway_by_name(&self, name: &str) -> Result<Option<LearningPathway>> {
        let mut conn = self.conn()?;
        // career_name is declared COLLATE NOCASE, so equality ignores case.
        let row: Option<LearningPathwayRow> = learning_pathways::table
            .filter(learning_pathways::career_name.eq(name.trim()))
            .select(LearningPathwayRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db_err)?;
        row.map(LearningPathwayRow::into_domain).transpose()
    }

    async fn insert_recommendation(&self, recommendation: &CareerRecommendation) -> Result<()> {
        let row = CareerRecommendationRow::from_domain(recommendation);
        let mut conn = self.conn()?;
        diesel::insert_into(career_recommendations::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(write_err("recommendation"))?;
        Ok(())
    }

    async fn list_recommendations_for(
        &self,
        student_id: &ProfileId,
    ) -> Result<Vec<CareerRecommendation>> {
        let mut conn = self.conn()?;
        let rows: Vec<CareerRecommendationRow> = career_recommendations::table
            .filter(career_recommendations::student_id.eq(student_id.as_str()))
            .order((
                career_recommendations::created_at.desc(),
                career_recommendations::id.desc(),
            ))
            .select(CareerRecommendationRow::as_select())
            .load(&mut conn)
            .map_err(db_err)?;
        rows.into_iter()
            .map(CareerRecommendationRow::into_domain)
            .collect()
    }
}
