//! Student dashboard aggregation and study time logging.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::activity::StudyActivity;
use crate::domain::enrollment::EnrollmentStatus;
use crate::domain::id::{AttemptId, CourseId, EnrollmentId, QuizId};
use crate::domain::profile::Profile;
use crate::domain::round_tenth;
use crate::error::{Error, Result};
use crate::port::outbound::store::{ActivityStore, AssessmentStore, CatalogStore, EnrollmentStore};

/// Days covered by the study-minutes total.
const STUDY_WINDOW_DAYS: i64 = 30;
/// Days shown in the weekly activity chart, today included.
const WEEK_DAYS: i64 = 7;
const RECENT_QUIZZES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub courses_enrolled: usize,
    pub courses_completed: usize,
    pub average_quiz_score: f64,
    pub study_minutes_30d: i64,
    pub ai_tutor_interactions: u64,
    pub current_streak_days: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub minutes: i32,
    pub course_id: Option<CourseId>,
    pub course_title: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseProgress {
    pub enrollment_id: EnrollmentId,
    pub course_id: CourseId,
    pub course_title: String,
    pub progress: f64,
    pub status: EnrollmentStatus,
    pub last_accessed: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentAttempt {
    pub attempt_id: AttemptId,
    pub quiz_id: QuizId,
    pub quiz_title: String,
    pub course_title: String,
    pub score: f64,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub profile: Profile,
    pub stats: DashboardStats,
    pub weekly_activity: Vec<DailyActivity>,
    pub course_progress: Vec<CourseProgress>,
    pub recent_quizzes: Vec<RecentAttempt>,
}

pub struct DashboardService {
    catalog: Arc<dyn CatalogStore>,
    enrollments: Arc<dyn EnrollmentStore>,
    assessments: Arc<dyn AssessmentStore>,
    activities: Arc<dyn ActivityStore>,
}

impl DashboardService {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        enrollments: Arc<dyn EnrollmentStore>,
        assessments: Arc<dyn AssessmentStore>,
        activities: Arc<dyn ActivityStore>,
    ) -> Self {
        Self {
            catalog,
            enrollments,
            assessments,
            activities,
        }
    }

    pub async fn dashboard(&self, actor: &Profile) -> Result<Dashboard> {
        let today = Utc::now().date_naive();
        let mut titles = CourseTitles::default();

        let enrollments = self.enrollments.list_enrollments_for(&actor.id).await?;
        let mut course_progress = Vec::with_capacity(enrollments.len());
        for e in &enrollments {
            course_progress.push(CourseProgress {
                enrollment_id: e.id.clone(),
                course_id: e.course_id.clone(),
                course_title: titles.get(&*self.catalog, &e.course_id).await?,
                progress: e.progress,
                status: e.status,
                last_accessed: e.last_accessed,
            });
        }

        let month = self
            .activities
            .list_activities_since(&actor.id, today - Duration::days(STUDY_WINDOW_DAYS - 1))
            .await?;
        let week_start = today - Duration::days(WEEK_DAYS - 1);
        let mut weekly_activity = Vec::new();
        for a in month.iter().filter(|a| a.date >= week_start) {
            let course_title = match &a.course_id {
                Some(id) => Some(titles.get(&*self.catalog, id).await?),
                None => None,
            };
            weekly_activity.push(DailyActivity {
                date: a.date,
                minutes: a.minutes,
                course_id: a.course_id.clone(),
                course_title,
            });
        }

        let attempts = self
            .assessments
            .list_attempts_for(&actor.id, Some(RECENT_QUIZZES))
            .await?;
        let mut recent_quizzes = Vec::with_capacity(attempts.len());
        for attempt in attempts {
            let quiz = self.assessments.get_quiz(&attempt.quiz_id).await?;
            let (quiz_title, course_title) = match quiz {
                Some(q) => {
                    let course_title = titles.get(&*self.catalog, &q.course_id).await?;
                    (q.title, course_title)
                }
                None => (String::new(), String::new()),
            };
            recent_quizzes.push(RecentAttempt {
                attempt_id: attempt.id,
                quiz_id: attempt.quiz_id,
                quiz_title,
                course_title,
                score: attempt.score,
                completed_at: attempt.completed_at,
            });
        }

        let stats = DashboardStats {
            courses_enrolled: enrollments.len(),
            courses_completed: enrollments.iter().filter(|e| e.is_completed()).count(),
            average_quiz_score: round_tenth(
                self.assessments
                    .average_score_for(&actor.id)
                    .await?
                    .unwrap_or(0.0),
            ),
            study_minutes_30d: month.iter().map(|a| i64::from(a.minutes)).sum(),
            ai_tutor_interactions: self.activities.count_tutor_sessions(&actor.id).await?,
            current_streak_days: streak(&month, today),
        };

        Ok(Dashboard {
            profile: actor.clone(),
            stats,
            weekly_activity,
            course_progress,
            recent_quizzes,
        })
    }

    /// Log study time. `date` defaults to today.
    pub async fn record_activity(
        &self,
        actor: &Profile,
        minutes: i64,
        course_id: Option<CourseId>,
        date: Option<NaiveDate>,
    ) -> Result<StudyActivity> {
        if let Some(id) = &course_id {
            if self.catalog.get_course(id).await?.is_none() {
                return Err(Error::not_found("course", id));
            }
        }
        let now = Utc::now();
        let activity = StudyActivity::new(
            actor.id.clone(),
            course_id,
            date.unwrap_or_else(|| now.date_naive()),
            minutes,
            now,
        )?;
        self.activities.insert_activity(&activity).await?;
        Ok(activity)
    }
}

/// Consecutive days with study time, ending today or yesterday.
fn streak(activities: &[StudyActivity], today: NaiveDate) -> u32 {
    let days: std::collections::HashSet<NaiveDate> = activities.iter().map(|a| a.date).collect();
    let mut day = if days.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };
    let mut count = 0;
    while days.contains(&day) {
        count += 1;
        day -= Duration::days(1);
    }
    count
}

/// Memoized course title lookups for one request.
#[derive(Default)]
struct CourseTitles(HashMap<CourseId, String>);

impl CourseTitles {
    async fn get(&mut self, catalog: &dyn CatalogStore, id: &CourseId) -> Result<String> {
        if let Some(title) = self.0.get(id) {
            return Ok(title.clone());
        }
        let title = catalog
            .get_course(id)
            .await?
            .map(|c| c.title)
            .unwrap_or_default();
        self.0.insert(id.clone(), title.clone());
        Ok(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::TestStore;
    use crate::domain::enrollment::{Enrollment, Progress};
    use crate::domain::profile::Role;
    use crate::domain::quiz::{Quiz, QuizAttempt, QuizDifficulty};

    fn service(store: &TestStore) -> DashboardService {
        DashboardService::new(store.arc(), store.arc(), store.arc(), store.arc())
    }

    fn activity(day: NaiveDate) -> StudyActivity {
        StudyActivity::new(Default::default(), None, day, 10, Utc::now()).unwrap()
    }

    #[test]
    fn streak_counts_back_from_today_or_yesterday() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let d = |n| today - Duration::days(n);

        assert_eq!(streak(&[], today), 0);
        assert_eq!(streak(&[activity(d(0)), activity(d(1)), activity(d(3))], today), 2);
        assert_eq!(streak(&[activity(d(1)), activity(d(2))], today), 2);
        assert_eq!(streak(&[activity(d(2))], today), 0);
    }

    #[tokio::test]
    async fn record_activity_validates_minutes_and_course() {
        let store = TestStore::new();
        let svc = service(&store);
        let student = store.profile("s@x.edu", Role::Student).await;

        assert!(matches!(
            svc.record_activity(&student, 0, None, None).await,
            Err(Error::Domain(_))
        ));
        assert!(matches!(
            svc.record_activity(&student, 30, Some(CourseId::new()), None).await,
            Err(Error::NotFound { .. })
        ));
        let ok = svc.record_activity(&student, 45, None, None).await.unwrap();
        assert_eq!(ok.date, Utc::now().date_naive());
    }

    #[tokio::test]
    async fn dashboard_aggregates() {
        let store = TestStore::new();
        let svc = service(&store);
        let student = store.profile("s@x.edu", Role::Student).await;
        let python = store.course("Python", "Programming", "beginner").await;
        let sql = store.course("SQL", "Data", "beginner").await;
        let now = Utc::now();
        let today = now.date_naive();

        let mut done = Enrollment::new(student.id.clone(), python.id.clone(), now);
        done.record_progress(Progress::COMPLETE, now);
        store.arc().insert_enrollment(&done).await.unwrap();
        store
            .arc()
            .insert_enrollment(&Enrollment::new(student.id.clone(), sql.id.clone(), now))
            .await
            .unwrap();

        svc.record_activity(&student, 30, Some(python.id.clone()), None)
            .await
            .unwrap();
        svc.record_activity(&student, 20, None, Some(today - Duration::days(10)))
            .await
            .unwrap();

        let quiz = Quiz {
            id: QuizId::new(),
            course_id: python.id.clone(),
            title: "Python - Easy Level Quiz".into(),
            description: String::new(),
            difficulty: QuizDifficulty::Easy,
            questions: vec![],
            created_by: student.id.clone(),
            created_at: now,
        };
        store.arc().insert_quiz(&quiz).await.unwrap();
        for score in [80.0, 65.0] {
            let attempt = QuizAttempt {
                id: AttemptId::new(),
                student_id: student.id.clone(),
                quiz_id: quiz.id.clone(),
                answers: vec![],
                score,
                completed_at: Utc::now(),
            };
            store.arc().insert_attempt(&attempt).await.unwrap();
        }

        let dash = svc.dashboard(&student).await.unwrap();
        assert_eq!(dash.stats.courses_enrolled, 2);
        assert_eq!(dash.stats.courses_completed, 1);
        assert_eq!(dash.stats.average_quiz_score, 72.5);
        assert_eq!(dash.stats.study_minutes_30d, 50);
        assert_eq!(dash.stats.current_streak_days, 1);
        assert_eq!(dash.weekly_activity.len(), 1);
        assert_eq!(dash.weekly_activity[0].course_title.as_deref(), Some("Python"));
        assert_eq!(dash.course_progress.len(), 2);
        assert_eq!(dash.recent_quizzes.len(), 2);
        assert_eq!(dash.recent_quizzes[0].course_title, "Python");
    }
}
