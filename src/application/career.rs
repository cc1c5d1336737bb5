//! Career pathways and personal roadmaps.

use std::sync::Arc;

use crate::domain::pathway::{EnrolledCourse, LearningPathway, Roadmap};
use crate::domain::profile::Profile;
use crate::error::{Error, Result};
use crate::port::outbound::store::{CatalogStore, EnrollmentStore, PathwayStore};

pub struct CareerService {
    catalog: Arc<dyn CatalogStore>,
    enrollments: Arc<dyn EnrollmentStore>,
    pathways: Arc<dyn PathwayStore>,
}

impl CareerService {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        enrollments: Arc<dyn EnrollmentStore>,
        pathways: Arc<dyn PathwayStore>,
    ) -> Self {
        Self {
            catalog,
            enrollments,
            pathways,
        }
    }

    pub async fn list(&self) -> Result<Vec<LearningPathway>> {
        self.pathways.list_pathways().await
    }

    /// Case-insensitive lookup by career name.
    pub async fn get(&self, name: &str) -> Result<LearningPathway> {
        self.pathways
            .find_pathway_by_name(name.trim())
            .await?
            .ok_or_else(|| Error::not_found("career path", name))
    }

    /// Roadmap toward the caller's target career.
    pub async fn roadmap(&self, actor: &Profile) -> Result<Roadmap> {
        let target = actor
            .target_career
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::not_found("target career", &actor.id))?;
        let pathway = self.get(target).await?;

        let mut enrolled = Vec::new();
        for enrollment in self.enrollments.list_enrollments_for(&actor.id).await? {
            if let Some(course) = self.catalog.get_course(&enrollment.course_id).await? {
                enrolled.push(EnrolledCourse {
                    title: course.title,
                    completed: enrollment.is_completed(),
                });
            }
        }

        Ok(Roadmap::build(pathway, &actor.interests, &enrolled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::TestStore;
    use crate::domain::enrollment::{Enrollment, Progress};
    use crate::domain::id::PathwayId;
    use crate::domain::profile::Role;
    use crate::port::outbound::store::AccountStore;
    use chrono::Utc;

    fn pathway(courses: &[&str]) -> LearningPathway {
        LearningPathway {
            id: PathwayId::new(),
            career_name: "Data Scientist".into(),
            description: "Turns data into decisions.".into(),
            salary_range: "$90K-$180K".into(),
            recommended_courses: courses.iter().map(|c| c.to_string()).collect(),
            recommended_certs: vec!["TensorFlow Developer".into()],
            recommended_skills: vec!["Python".into(), "SQL".into()],
            job_outlook: "Growing".into(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn lookup_ignores_case() {
        let store = TestStore::new();
        let svc = CareerService::new(store.arc(), store.arc(), store.arc());
        store.arc().insert_pathway(&pathway(&[])).await.unwrap();

        assert_eq!(svc.get("data scientist").await.unwrap().career_name, "Data Scientist");
        assert!(matches!(
            svc.get("Astronaut").await,
            Err(Error::NotFound { .. })
        ));
        assert_eq!(svc.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn roadmap_uses_target_and_enrollments() {
        let store = TestStore::new();
        let svc = CareerService::new(store.arc(), store.arc(), store.arc());
        store
            .arc()
            .insert_pathway(&pathway(&["Python", "Statistics"]))
            .await
            .unwrap();
        let python = store.course("Python", "Programming", "beginner").await;
        let mut student = store.profile("s@x.edu", Role::Student).await;

        assert!(matches!(
            svc.roadmap(&student).await,
            Err(Error::NotFound { entity: "target career", .. })
        ));

        student.target_career = Some("data SCIENTIST".into());
        student.interests = vec!["python".into()];
        store.arc().update_profile(&student).await.unwrap();

        let now = Utc::now();
        let mut done = Enrollment::new(student.id.clone(), python.id.clone(), now);
        done.record_progress(Progress::COMPLETE, now);
        store.arc().insert_enrollment(&done).await.unwrap();

        let roadmap = svc.roadmap(&student).await.unwrap();
        let progress = &roadmap.current_progress;
        assert_eq!(progress.completed_recommended_courses, vec!["Python"]);
        assert_eq!(progress.not_started_recommended_courses, vec!["Statistics"]);
        assert_eq!(progress.completion_percentage, 50.0);
        assert_eq!(roadmap.skill_gaps, vec!["SQL"]);
        assert_eq!(roadmap.next_steps[0], "Enroll in: Statistics");
    }
}
