//! Enrollment, progress tracking and certification.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::course::Course;
use crate::domain::enrollment::{Certification, Enrollment, Progress};
use crate::domain::id::{CourseId, EnrollmentId, ModuleId};
use crate::domain::notification::Notification;
use crate::domain::profile::Profile;
use crate::error::{Error, Result};
use crate::port::outbound::store::{
    CatalogStore, CourseFilter, EnrollmentChange, EnrollmentStore, NotificationStore,
};

/// Draws of a certificate number before giving up.
const CERTIFICATE_ATTEMPTS: usize = 3;

/// An enrollment with its course.
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentView {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub course: Course,
}

/// Result of a progress change.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressOutcome {
    pub enrollment: Enrollment,
    /// Set only by the update that completed the course.
    pub certification: Option<Certification>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CertificationView {
    #[serde(flatten)]
    pub certification: Certification,
    pub course_title: String,
}

pub struct EnrollmentService {
    catalog: Arc<dyn CatalogStore>,
    enrollments: Arc<dyn EnrollmentStore>,
    notifications: Arc<dyn NotificationStore>,
}

impl EnrollmentService {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        enrollments: Arc<dyn EnrollmentStore>,
        notifications: Arc<dyn NotificationStore>,
    ) -> Self {
        Self {
            catalog,
            enrollments,
            notifications,
        }
    }

    /// Enroll the caller and send a welcome notification.
    pub async fn enroll(&self, actor: &Profile, course_id: &CourseId) -> Result<Enrollment> {
        let course = self
            .catalog
            .get_course(course_id)
            .await?
            .ok_or_else(|| Error::not_found("course", course_id))?;
        if !course.is_active {
            return Err(Error::Conflict(format!(
                "{} is not open for enrollment",
                course.title
            )));
        }
        if self
            .enrollments
            .find_enrollment(&actor.id, course_id)
            .await?
            .is_some()
        {
            return Err(Error::Conflict("already enrolled in this course".into()));
        }

        let now = Utc::now();
        let enrollment = Enrollment::new(actor.id.clone(), course.id.clone(), now);
        self.enrollments.insert_enrollment(&enrollment).await?;
        info!(student_id = %actor.id, course_id = %course.id, "Enrolled");

        self.notify(Notification::welcome(actor.id.clone(), &course.title, now))
            .await;
        Ok(enrollment)
    }

    /// The caller's enrollments with course details, newest first.
    pub async fn list(&self, actor: &Profile) -> Result<Vec<EnrollmentView>> {
        let enrollments = self.enrollments.list_enrollments_for(&actor.id).await?;
        let mut views = Vec::with_capacity(enrollments.len());
        for enrollment in enrollments {
            if let Some(course) = self.catalog.get_course(&enrollment.course_id).await? {
                views.push(EnrollmentView { enrollment, course });
            }
        }
        Ok(views)
    }

    /// Active courses the caller is not enrolled in.
    pub async fn available(&self, actor: &Profile) -> Result<Vec<Course>> {
        let enrolled: HashSet<CourseId> = self
            .enrollments
            .list_enrollments_for(&actor.id)
            .await?
            .into_iter()
            .map(|e| e.course_id)
            .collect();
        let courses = self.catalog.list_courses(&CourseFilter::default()).await?;
        Ok(courses
            .into_iter()
            .filter(|c| !enrolled.contains(&c.id))
            .collect())
    }

    pub async fn get(&self, actor: &Profile, id: &EnrollmentId) -> Result<Enrollment> {
        let enrollment = self
            .enrollments
            .get_enrollment(id)
            .await?
            .ok_or_else(|| Error::not_found("enrollment", id))?;
        if enrollment.student_id != actor.id && !actor.is_admin() {
            return Err(Error::Forbidden("not your enrollment".into()));
        }
        Ok(enrollment)
    }

    /// Set progress directly from the course player.
    pub async fn update_progress(
        &self,
        actor: &Profile,
        id: &EnrollmentId,
        progress: f64,
    ) -> Result<ProgressOutcome> {
        let progress = Progress::try_new(progress)?;
        let enrollment = self.get(actor, id).await?;
        let now = Utc::now();
        self.apply(&enrollment, &|e: &mut Enrollment| e.record_progress(progress, now))
            .await
    }

    /// Record a finished module and recompute progress from the module ratio.
    pub async fn complete_module(
        &self,
        actor: &Profile,
        id: &EnrollmentId,
        module_id: &ModuleId,
    ) -> Result<ProgressOutcome> {
        let enrollment = self.get(actor, id).await?;
        let module = self
            .catalog
            .get_module(module_id)
            .await?
            .filter(|m| m.course_id == enrollment.course_id && m.is_active)
            .ok_or_else(|| Error::not_found("module", module_id))?;
        let active = self
            .catalog
            .list_modules(&enrollment.course_id, false)
            .await?
            .len();

        let now = Utc::now();
        self.apply(&enrollment, &|e: &mut Enrollment| {
            e.complete_module(module.id.clone(), active, now)
        })
        .await
    }

    pub async fn unenroll(&self, actor: &Profile, id: &EnrollmentId) -> Result<()> {
        let enrollment = self.get(actor, id).await?;
        self.enrollments.delete_enrollment(&enrollment.id).await?;
        info!(student_id = %enrollment.student_id, course_id = %enrollment.course_id, "Unenrolled");
        Ok(())
    }

    /// The caller's certificates with course titles, newest first.
    pub async fn certifications(&self, actor: &Profile) -> Result<Vec<CertificationView>> {
        let certifications = self.enrollments.list_certifications_for(&actor.id).await?;
        let mut views = Vec::with_capacity(certifications.len());
        for certification in certifications {
            let course_title = self
                .catalog
                .get_course(&certification.course_id)
                .await?
                .map(|c| c.title)
                .unwrap_or_default();
            views.push(CertificationView {
                certification,
                course_title,
            });
        }
        Ok(views)
    }

    /// Persist a progress change. The enrollment row and its certificate are
    /// written together; a taken certificate number is redrawn.
    async fn apply(
        &self,
        enrollment: &Enrollment,
        change: EnrollmentChange<'_>,
    ) -> Result<ProgressOutcome> {
        let mut attempt = 1;
        let changed = loop {
            let certificate = Certification::issue(
                enrollment.student_id.clone(),
                enrollment.course_id.clone(),
                rand::thread_rng().gen(),
                Utc::now(),
            );
            match self
                .enrollments
                .change_enrollment(&enrollment.id, change, &certificate)
                .await
            {
                Err(Error::Conflict(reason)) if attempt < CERTIFICATE_ATTEMPTS => {
                    warn!(enrollment_id = %enrollment.id, attempt, %reason, "Certificate number taken, redrawing");
                    attempt += 1;
                }
                other => break other?,
            }
        };

        if let Some(certification) = &changed.certification {
            self.announce(certification).await;
        }
        Ok(ProgressOutcome {
            enrollment: changed.enrollment,
            certification: changed.certification,
        })
    }

    async fn announce(&self, certification: &Certification) {
        info!(
            student_id = %certification.student_id,
            course_id = %certification.course_id,
            certificate = %certification.certificate_number,
            "Course completed"
        );
        let title = match self.catalog.get_course(&certification.course_id).await {
            Ok(Some(course)) => course.title,
            Ok(None) => "your course".into(),
            Err(e) => {
                warn!(course_id = %certification.course_id, error = %e, "Failed to load course title");
                "your course".into()
            }
        };
        self.notify(Notification::course_completed(
            certification.student_id.clone(),
            &title,
            &certification.certificate_number,
            certification.issued_at,
        ))
        .await;
    }

    async fn notify(&self, notification: Notification) {
        if let Err(e) = self.notifications.insert_notification(&notification).await {
            warn!(recipient = %notification.recipient_id, error = %e, "Failed to store notification");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::TestStore;
    use crate::domain::course::CourseModule;
    use crate::domain::enrollment::EnrollmentStatus;
    use crate::domain::profile::Role;

    fn service(store: &TestStore) -> EnrollmentService {
        EnrollmentService::new(store.arc(), store.arc(), store.arc())
    }

    async fn add_module(store: &TestStore, course: &CourseId, index: i32) -> CourseModule {
        let module = CourseModule {
            id: ModuleId::new(),
            course_id: course.clone(),
            title: format!("Module {index}"),
            description: String::new(),
            video_url: None,
            duration_minutes: 10,
            order_index: index,
            content: None,
            is_active: true,
            created_at: Utc::now(),
        };
        store.arc().insert_module(&module).await.unwrap();
        module
    }

    #[tokio::test]
    async fn enroll_twice_is_conflict_and_sends_welcome() {
        let store = TestStore::new();
        let svc = service(&store);
        let student = store.profile("s@x.edu", Role::Student).await;
        let course = store.course("Python", "Programming", "beginner").await;

        let enrollment = svc.enroll(&student, &course.id).await.unwrap();
        assert_eq!(enrollment.status, EnrollmentStatus::Active);
        assert_eq!(enrollment.progress, 0.0);
        assert!(matches!(
            svc.enroll(&student, &course.id).await,
            Err(Error::Conflict(_))
        ));

        let inbox = store.arc().list_notifications(&student.id, false).await.unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].title, "Welcome to Python!");
    }

    #[tokio::test]
    async fn enrolled_course_leaves_available_list() {
        let store = TestStore::new();
        let svc = service(&store);
        let student = store.profile("s@x.edu", Role::Student).await;
        let python = store.course("Python", "Programming", "beginner").await;
        store.course("SQL", "Data", "beginner").await;

        assert_eq!(svc.available(&student).await.unwrap().len(), 2);
        svc.enroll(&student, &python.id).await.unwrap();
        let available = svc.available(&student).await.unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].title, "SQL");
    }

    #[tokio::test]
    async fn completion_happens_once() {
        let store = TestStore::new();
        let svc = service(&store);
        let student = store.profile("s@x.edu", Role::Student).await;
        let course = store.course("Python", "Programming", "beginner").await;
        let enrollment = svc.enroll(&student, &course.id).await.unwrap();

        let first = svc.update_progress(&student, &enrollment.id, 100.0).await.unwrap();
        assert!(first.enrollment.is_completed());
        let cert = first.certification.unwrap();
        assert!(cert.certificate_number.starts_with("LH-"));

        let second = svc.update_progress(&student, &enrollment.id, 40.0).await.unwrap();
        assert!(second.certification.is_none());
        assert!(second.enrollment.is_completed());
        assert_eq!(second.enrollment.progress, 100.0);

        assert_eq!(svc.certifications(&student).await.unwrap().len(), 1);
        let inbox = store.arc().list_notifications(&student.id, false).await.unwrap();
        assert_eq!(inbox.iter().filter(|n| n.title == "Course completed!").count(), 1);
    }

    #[tokio::test]
    async fn failed_certificate_leaves_enrollment_open() {
        let store = TestStore::new();
        let svc = service(&store);
        let student = store.profile("s@x.edu", Role::Student).await;
        let course = store.course("Python", "Programming", "beginner").await;
        let enrollment = svc.enroll(&student, &course.id).await.unwrap();
        svc.update_progress(&student, &enrollment.id, 60.0).await.unwrap();

        store.exec(
            "CREATE TRIGGER refuse_certificates BEFORE INSERT ON certifications \
             BEGIN SELECT RAISE(ABORT, 'disk full'); END",
        );
        assert!(svc.update_progress(&student, &enrollment.id, 100.0).await.is_err());
        let stored = svc.get(&student, &enrollment.id).await.unwrap();
        assert!(!stored.is_completed());
        assert_eq!(stored.progress, 60.0);

        store.exec("DROP TRIGGER refuse_certificates");
        let retry = svc.update_progress(&student, &enrollment.id, 100.0).await.unwrap();
        assert!(retry.enrollment.is_completed());
        assert!(retry.certification.is_some());
        assert_eq!(svc.certifications(&student).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn out_of_range_progress_is_rejected() {
        let store = TestStore::new();
        let svc = service(&store);
        let student = store.profile("s@x.edu", Role::Student).await;
        let course = store.course("Python", "Programming", "beginner").await;
        let enrollment = svc.enroll(&student, &course.id).await.unwrap();

        for bad in [-1.0, 101.0, f64::NAN] {
            assert!(matches!(
                svc.update_progress(&student, &enrollment.id, bad).await,
                Err(Error::Domain(_))
            ));
        }
    }

    #[tokio::test]
    async fn module_completion_is_idempotent_ratio() {
        let store = TestStore::new();
        let svc = service(&store);
        let student = store.profile("s@x.edu", Role::Student).await;
        let course = store.course("Python", "Programming", "beginner").await;
        let m1 = add_module(&store, &course.id, 1).await;
        add_module(&store, &course.id, 2).await;
        add_module(&store, &course.id, 3).await;
        let enrollment = svc.enroll(&student, &course.id).await.unwrap();

        let once = svc.complete_module(&student, &enrollment.id, &m1.id).await.unwrap();
        assert_eq!(once.enrollment.progress, 33.0);
        let twice = svc.complete_module(&student, &enrollment.id, &m1.id).await.unwrap();
        assert_eq!(twice.enrollment.progress, 33.0);
        assert_eq!(twice.enrollment.completed_modules.len(), 1);
    }

    #[tokio::test]
    async fn module_from_other_course_is_not_found() {
        let store = TestStore::new();
        let svc = service(&store);
        let student = store.profile("s@x.edu", Role::Student).await;
        let python = store.course("Python", "Programming", "beginner").await;
        let sql = store.course("SQL", "Data", "beginner").await;
        let foreign = add_module(&store, &sql.id, 1).await;
        let enrollment = svc.enroll(&student, &python.id).await.unwrap();

        assert!(matches!(
            svc.complete_module(&student, &enrollment.id, &foreign.id).await,
            Err(Error::NotFound { entity: "module", .. })
        ));
    }

    #[tokio::test]
    async fn other_students_cannot_touch_enrollment() {
        let store = TestStore::new();
        let svc = service(&store);
        let owner = store.profile("a@x.edu", Role::Student).await;
        let other = store.profile("b@x.edu", Role::Student).await;
        let admin = store.profile("root@x.edu", Role::Admin).await;
        let course = store.course("Python", "Programming", "beginner").await;
        let enrollment = svc.enroll(&owner, &course.id).await.unwrap();

        assert!(matches!(
            svc.update_progress(&other, &enrollment.id, 10.0).await,
            Err(Error::Forbidden(_))
        ));
        assert!(svc.get(&admin, &enrollment.id).await.is_ok());
        svc.unenroll(&owner, &enrollment.id).await.unwrap();
        assert!(svc.list(&owner).await.unwrap().is_empty());
    }
}
