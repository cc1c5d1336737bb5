//! Quizzes, attempts and grading.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{AttemptId, CourseId, ProfileId, QuizId};
use super::round_tenth;

/// Requested quiz difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizDifficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl QuizDifficulty {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Capitalized form used in quiz titles.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for QuizDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuizDifficulty {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(DomainError::InvalidChoice {
                field: "difficulty",
                value: s.to_string(),
                expected: "easy, medium, hard",
            }),
        }
    }
}

/// A multiple choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub explanation: String,
}

/// A question with the answer and explanation stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionPrompt {
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: QuizId,
    pub course_id: CourseId,
    pub title: String,
    pub description: String,
    pub difficulty: QuizDifficulty,
    pub questions: Vec<QuizQuestion>,
    pub created_by: ProfileId,
    pub created_at: DateTime<Utc>,
}

/// What a student sees of a quiz before attempting it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizSheet {
    pub id: QuizId,
    pub course_id: CourseId,
    pub title: String,
    pub description: String,
    pub difficulty: QuizDifficulty,
    pub questions: Vec<QuestionPrompt>,
    pub created_at: DateTime<Utc>,
}

impl Quiz {
    /// `<topic> - <Difficulty> Level Quiz`
    #[must_use]
    pub fn title_for(topic: &str, difficulty: QuizDifficulty) -> String {
        format!("{topic} - {} Level Quiz", difficulty.label())
    }

    /// Strip answers for student display.
    #[must_use]
    pub fn sheet(&self) -> QuizSheet {
        QuizSheet {
            id: self.id.clone(),
            course_id: self.course_id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            difficulty: self.difficulty,
            questions: self
                .questions
                .iter()
                .map(|q| QuestionPrompt {
                    question: q.question.clone(),
                    options: q.options.clone(),
                })
                .collect(),
            created_at: self.created_at,
        }
    }

    /// Score a set of answers, one per question.
    pub fn grade(&self, answers: &[usize]) -> Result<Grade, DomainError> {
        if answers.len() != self.questions.len() {
            return Err(DomainError::AnswerCountMismatch {
                expected: self.questions.len(),
                actual: answers.len(),
            });
        }

        let results: Vec<QuestionResult> = self
            .questions
            .iter()
            .zip(answers)
            .enumerate()
            .map(|(index, (q, &selected))| QuestionResult {
                index,
                selected,
                correct_answer: q.correct_answer,
                is_correct: selected == q.correct_answer,
                explanation: q.explanation.clone(),
            })
            .collect();

        let correct = results.iter().filter(|r| r.is_correct).count();
        let total = results.len();
        let score = if total == 0 {
            0.0
        } else {
            round_tenth(correct as f64 / total as f64 * 100.0)
        };

        Ok(Grade {
            score,
            correct,
            total,
            results,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionResult {
    pub index: usize,
    pub selected: usize,
    pub correct_answer: usize,
    pub is_correct: bool,
    pub explanation: String,
}

/// Outcome of grading one attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grade {
    pub score: f64,
    pub correct: usize,
    pub total: usize,
    pub results: Vec<QuestionResult>,
}

/// A stored quiz attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub id: AttemptId,
    pub student_id: ProfileId,
    pub quiz_id: QuizId,
    pub answers: Vec<usize>,
    pub score: f64,
    pub completed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: usize) -> QuizQuestion {
        QuizQuestion {
            question: "q".into(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_answer: correct,
            explanation: "because".into(),
        }
    }

    fn quiz(questions: Vec<QuizQuestion>) -> Quiz {
        Quiz {
            id: QuizId::new(),
            course_id: CourseId::new(),
            title: Quiz::title_for("Rust", QuizDifficulty::Hard),
            description: String::new(),
            difficulty: QuizDifficulty::Hard,
            questions,
            created_by: ProfileId::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn title_capitalizes_difficulty() {
        assert_eq!(
            Quiz::title_for("Ownership", QuizDifficulty::Medium),
            "Ownership - Medium Level Quiz"
        );
    }

    #[test]
    fn grade_rounds_to_one_decimal() {
        let q = quiz(vec![question(0), question(1), question(2)]);
        let grade = q.grade(&[0, 1, 3]).unwrap();
        assert_eq!(grade.correct, 2);
        assert_eq!(grade.score, 66.7);
        assert!(!grade.results[2].is_correct);
    }

    #[test]
    fn grade_requires_one_answer_per_question() {
        let q = quiz(vec![question(0), question(1)]);
        assert_eq!(
            q.grade(&[0]),
            Err(DomainError::AnswerCountMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn sheet_hides_answers() {
        let q = quiz(vec![question(2)]);
        let json = serde_json::to_value(q.sheet()).unwrap();
        assert!(json["questions"][0].get("correct_answer").is_none());
        assert!(json["questions"][0].get("explanation").is_none());
    }

    #[test]
    fn difficulty_defaults_to_medium() {
        assert_eq!(QuizDifficulty::default(), QuizDifficulty::Medium);
        assert!("extreme".parse::<QuizDifficulty>().is_err());
    }
}
