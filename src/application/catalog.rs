//! Course catalog management.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::course::{Course, CourseDraft, CourseModule, CourseUpdate, ModuleDraft};
use crate::domain::id::CourseId;
use crate::domain::profile::Profile;
use crate::error::{Error, Result};
use crate::port::outbound::store::{CatalogStore, CourseFilter};

pub struct CatalogService {
    catalog: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn CatalogStore>) -> Self {
        Self { catalog }
    }

    /// List courses. Inactive courses are only shown to staff who ask.
    pub async fn list(
        &self,
        actor: &Profile,
        category: Option<String>,
        include_inactive: bool,
    ) -> Result<Vec<Course>> {
        let filter = CourseFilter {
            category: category.filter(|c| !c.trim().is_empty()),
            include_inactive: include_inactive && actor.role.can_teach(),
            limit: None,
        };
        self.catalog.list_courses(&filter).await
    }

    /// One course. Students get `NotFound` for inactive courses.
    pub async fn get(&self, actor: &Profile, id: &CourseId) -> Result<Course> {
        self.fetch(id)
            .await
            .and_then(|course| visible_to(actor, course))
    }

    pub async fn create(&self, actor: &Profile, draft: CourseDraft) -> Result<Course> {
        if !actor.role.can_teach() {
            return Err(Error::Forbidden(
                "only faculty and admins can create courses".into(),
            ));
        }
        let course = draft.into_course(actor.id.clone(), actor.full_name.clone(), Utc::now())?;
        self.catalog.insert_course(&course).await?;
        info!(course_id = %course.id, title = %course.title, by = %actor.id, "Course created");
        Ok(course)
    }

    pub async fn update(&self, actor: &Profile, id: &CourseId, update: CourseUpdate) -> Result<Course> {
        let mut course = self.fetch(id).await?;
        ensure_manages(actor, &course)?;
        update.apply(&mut course, Utc::now())?;
        self.catalog.update_course(&course).await?;
        Ok(course)
    }

    /// Delete a course together with its modules, enrollments, quizzes and
    /// certificates.
    pub async fn delete(&self, actor: &Profile, id: &CourseId) -> Result<()> {
        let course = self.fetch(id).await?;
        ensure_manages(actor, &course)?;
        if !self.catalog.delete_course(id).await? {
            return Err(Error::not_found("course", id));
        }
        info!(course_id = %id, by = %actor.id, "Course deleted");
        Ok(())
    }

    /// Active modules in playback order.
    pub async fn modules(&self, actor: &Profile, id: &CourseId) -> Result<Vec<CourseModule>> {
        self.get(actor, id).await?;
        self.catalog.list_modules(id, false).await
    }

    pub async fn add_module(
        &self,
        actor: &Profile,
        id: &CourseId,
        draft: ModuleDraft,
    ) -> Result<CourseModule> {
        let course = self.fetch(id).await?;
        ensure_manages(actor, &course)?;
        let next = self.catalog.next_module_index(id).await?;
        let module = draft.into_module(course.id, next, Utc::now())?;
        self.catalog.insert_module(&module).await?;
        Ok(module)
    }

    async fn fetch(&self, id: &CourseId) -> Result<Course> {
        self.catalog
            .get_course(id)
            .await?
            .ok_or_else(|| Error::not_found("course", id))
    }
}

/// Hide an inactive course from anyone who cannot teach.
pub(crate) fn visible_to(actor: &Profile, course: Course) -> Result<Course> {
    if course.is_visible_to(actor.role) {
        Ok(course)
    } else {
        Err(Error::not_found("course", &course.id))
    }
}

/// The owning instructor or an admin may change a course.
fn ensure_manages(actor: &Profile, course: &Course) -> Result<()> {
    if actor.is_admin() || (actor.role.can_teach() && course.is_owned_by(&actor.id)) {
        Ok(())
    } else {
        Err(Error::Forbidden(
            "only the course instructor or an admin can change this course".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::TestStore;
    use crate::domain::profile::Role;

    fn draft(title: &str) -> CourseDraft {
        CourseDraft {
            title: title.into(),
            description: String::new(),
            category: "Programming".into(),
            difficulty: "beginner".into(),
            duration_hours: 12.0,
            tags: vec![],
        }
    }

    fn module(title: &str, order_index: Option<i32>) -> ModuleDraft {
        ModuleDraft {
            title: title.into(),
            description: String::new(),
            video_url: None,
            duration_minutes: 20,
            order_index,
            content: None,
        }
    }

    #[tokio::test]
    async fn students_cannot_create_courses() {
        let store = TestStore::new();
        let catalog = CatalogService::new(store.arc());
        let student = store.profile("s@x.edu", Role::Student).await;
        assert!(matches!(
            catalog.create(&student, draft("Rust")).await,
            Err(Error::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn creator_becomes_instructor_and_only_owner_edits() {
        let store = TestStore::new();
        let catalog = CatalogService::new(store.arc());
        let owner = store.profile("f1@x.edu", Role::Faculty).await;
        let other = store.profile("f2@x.edu", Role::Faculty).await;
        let admin = store.profile("root@x.edu", Role::Admin).await;

        let course = catalog.create(&owner, draft("Rust")).await.unwrap();
        assert_eq!(course.instructor_id.as_ref(), Some(&owner.id));
        assert!(course.is_active);

        let rename = || CourseUpdate {
            title: Some("Rust 2".into()),
            ..CourseUpdate::default()
        };
        assert!(matches!(
            catalog.update(&other, &course.id, rename()).await,
            Err(Error::Forbidden(_))
        ));
        assert_eq!(
            catalog.update(&admin, &course.id, rename()).await.unwrap().title,
            "Rust 2"
        );
    }

    #[tokio::test]
    async fn inactive_courses_hidden_from_students() {
        let store = TestStore::new();
        let catalog = CatalogService::new(store.arc());
        let faculty = store.profile("f@x.edu", Role::Faculty).await;
        let student = store.profile("s@x.edu", Role::Student).await;
        let course = catalog.create(&faculty, draft("Rust")).await.unwrap();
        catalog
            .update(
                &faculty,
                &course.id,
                CourseUpdate {
                    is_active: Some(false),
                    ..CourseUpdate::default()
                },
            )
            .await
            .unwrap();

        assert!(catalog.list(&student, None, true).await.unwrap().is_empty());
        assert_eq!(catalog.list(&faculty, None, true).await.unwrap().len(), 1);
        assert!(catalog.list(&faculty, None, false).await.unwrap().is_empty());

        assert!(matches!(
            catalog.get(&student, &course.id).await,
            Err(Error::NotFound { entity: "course", .. })
        ));
        assert!(matches!(
            catalog.modules(&student, &course.id).await,
            Err(Error::NotFound { entity: "course", .. })
        ));
        assert!(!catalog.get(&faculty, &course.id).await.unwrap().is_active);
        assert!(catalog.modules(&faculty, &course.id).await.is_ok());
    }

    #[tokio::test]
    async fn modules_append_in_order() {
        let store = TestStore::new();
        let catalog = CatalogService::new(store.arc());
        let faculty = store.profile("f@x.edu", Role::Faculty).await;
        let course = catalog.create(&faculty, draft("Rust")).await.unwrap();

        catalog
            .add_module(&faculty, &course.id, module("Second", Some(2)))
            .await
            .unwrap();
        catalog
            .add_module(&faculty, &course.id, module("First", Some(1)))
            .await
            .unwrap();
        let appended = catalog
            .add_module(&faculty, &course.id, module("Third", None))
            .await
            .unwrap();
        assert_eq!(appended.order_index, 3);

        let titles: Vec<_> = catalog
            .modules(&faculty, &course.id)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles, ["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn delete_removes_course() {
        let store = TestStore::new();
        let catalog = CatalogService::new(store.arc());
        let faculty = store.profile("f@x.edu", Role::Faculty).await;
        let course = catalog.create(&faculty, draft("Rust")).await.unwrap();

        catalog.delete(&faculty, &course.id).await.unwrap();
        assert!(matches!(
            catalog.get(&faculty, &course.id).await,
            Err(Error::NotFound { entity: "course", .. })
        ));
    }
}
