//! Quiz generation, viewing and grading.

mod bank;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::application::catalog::visible_to;
use crate::domain::error::{bounded, DomainError};
use crate::domain::id::{AttemptId, CourseId, QuizId};
use crate::domain::profile::Profile;
use crate::domain::quiz::{Grade, Quiz, QuizAttempt, QuizDifficulty, QuizSheet};
use crate::error::{Error, Result};
use crate::port::outbound::store::{AssessmentStore, CatalogStore};

pub const DEFAULT_QUESTIONS: i64 = 5;
pub const MAX_QUESTIONS: i64 = 20;
const MAX_TOPIC_CHARS: usize = 200;

#[derive(Debug, Clone, Deserialize)]
pub struct QuizRequest {
    pub course_id: CourseId,
    pub topic: String,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub num_questions: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedQuiz {
    pub quiz: Quiz,
    pub message: &'static str,
}

/// A quiz as the caller may see it: staff get answers, students don't.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum QuizView {
    Full(Quiz),
    Sheet(QuizSheet),
}

impl QuizView {
    fn for_actor(actor: &Profile, quiz: Quiz) -> Self {
        if actor.role.can_teach() {
            Self::Full(quiz)
        } else {
            Self::Sheet(quiz.sheet())
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AttemptResult {
    pub attempt_id: AttemptId,
    pub quiz_id: QuizId,
    pub completed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub grade: Grade,
}

pub struct QuizService {
    catalog: Arc<dyn CatalogStore>,
    assessments: Arc<dyn AssessmentStore>,
}

impl QuizService {
    pub fn new(catalog: Arc<dyn CatalogStore>, assessments: Arc<dyn AssessmentStore>) -> Self {
        Self {
            catalog,
            assessments,
        }
    }

    /// Generate and store a quiz on `topic` for a course.
    pub async fn generate(&self, actor: &Profile, request: QuizRequest) -> Result<GeneratedQuiz> {
        let topic = bounded("topic", &request.topic, 1, MAX_TOPIC_CHARS)?;
        let difficulty = match request.difficulty.as_deref().map(str::trim) {
            None | Some("") => QuizDifficulty::default(),
            Some(raw) => raw.parse()?,
        };
        let count = request.num_questions.unwrap_or(DEFAULT_QUESTIONS);
        if !(1..=MAX_QUESTIONS).contains(&count) {
            return Err(DomainError::OutOfRange {
                field: "num_questions",
                value: count,
                min: 1,
                max: MAX_QUESTIONS,
            }
            .into());
        }
        let course = self
            .catalog
            .get_course(&request.course_id)
            .await?
            .ok_or_else(|| Error::not_found("course", &request.course_id))?;

        let quiz = Quiz {
            id: QuizId::new(),
            course_id: course.id.clone(),
            title: Quiz::title_for(&topic, difficulty),
            description: format!("Test your knowledge on {topic} from {}", course.title),
            difficulty,
            questions: bank::questions(&topic, &course.title, difficulty, count as usize),
            created_by: actor.id.clone(),
            created_at: Utc::now(),
        };
        self.assessments.insert_quiz(&quiz).await?;
        info!(quiz_id = %quiz.id, course_id = %course.id, questions = count, "Quiz generated");

        Ok(GeneratedQuiz {
            quiz,
            message: "Quiz generated successfully",
        })
    }

    pub async fn list_for_course(&self, actor: &Profile, course_id: &CourseId) -> Result<Vec<QuizView>> {
        let course = self
            .catalog
            .get_course(course_id)
            .await?
            .ok_or_else(|| Error::not_found("course", course_id))?;
        visible_to(actor, course)?;
        Ok(self
            .assessments
            .list_quizzes_for_course(course_id)
            .await?
            .into_iter()
            .map(|q| QuizView::for_actor(actor, q))
            .collect())
    }

    pub async fn get(&self, actor: &Profile, id: &QuizId) -> Result<QuizView> {
        Ok(QuizView::for_actor(actor, self.quiz(id).await?))
    }

    /// Grade and store an attempt. Answers are option indexes, one per
    /// question.
    pub async fn attempt(&self, actor: &Profile, id: &QuizId, answers: Vec<usize>) -> Result<AttemptResult> {
        let quiz = self.quiz(id).await?;
        let grade = quiz.grade(&answers)?;
        let attempt = QuizAttempt {
            id: AttemptId::new(),
            student_id: actor.id.clone(),
            quiz_id: quiz.id,
            answers,
            score: grade.score,
            completed_at: Utc::now(),
        };
        self.assessments.insert_attempt(&attempt).await?;
        info!(attempt_id = %attempt.id, score = grade.score, "Quiz attempt graded");

        Ok(AttemptResult {
            attempt_id: attempt.id,
            quiz_id: attempt.quiz_id,
            completed_at: attempt.completed_at,
            grade,
        })
    }

    async fn quiz(&self, id: &QuizId) -> Result<Quiz> {
        self.assessments
            .get_quiz(id)
            .await?
            .ok_or_else(|| Error::not_found("quiz", id))
    }
}
