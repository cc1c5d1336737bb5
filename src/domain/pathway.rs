//! Career pathways, stored recommendations and personal roadmaps.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{PathwayId, ProfileId, RecommendationId};
use super::round_tenth;

/// Share of recommended courses after which certifications are suggested.
const CERTIFICATION_THRESHOLD: f64 = 0.7;

/// A career and what it takes to get there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPathway {
    pub id: PathwayId,
    pub career_name: String,
    pub description: String,
    pub salary_range: String,
    pub recommended_courses: Vec<String>,
    pub recommended_certs: Vec<String>,
    pub recommended_skills: Vec<String>,
    pub job_outlook: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Course,
    Certification,
}

impl RecommendationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::Certification => "certification",
        }
    }
}

impl fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecommendationKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "course" => Ok(Self::Course),
            "certification" => Ok(Self::Certification),
            _ => Err(DomainError::InvalidChoice {
                field: "kind",
                value: s.to_string(),
                expected: "course, certification",
            }),
        }
    }
}

/// A saved suggestion for a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerRecommendation {
    pub id: RecommendationId,
    pub student_id: ProfileId,
    pub kind: RecommendationKind,
    pub title: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

/// How far a student is through a pathway's recommended courses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadmapProgress {
    pub completed_recommended_courses: Vec<String>,
    pub in_progress_recommended_courses: Vec<String>,
    pub not_started_recommended_courses: Vec<String>,
    pub completion_percentage: f64,
}

/// A student's personal roadmap toward a pathway.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Roadmap {
    pub target_career: LearningPathway,
    pub current_progress: RoadmapProgress,
    pub next_steps: Vec<String>,
    pub skill_gaps: Vec<String>,
    pub recommended_timeline: String,
}

/// A course the student is enrolled in, by title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrolledCourse {
    pub title: String,
    pub completed: bool,
}

impl Roadmap {
    /// Assess progress against `pathway` given the student's interests and
    /// enrollments.
    #[must_use]
    pub fn build(pathway: LearningPathway, interests: &[String], enrolled: &[EnrolledCourse]) -> Self {
        let enrolled_titles: HashSet<&str> = enrolled.iter().map(|e| e.title.as_str()).collect();
        let completed_titles: HashSet<&str> = enrolled
            .iter()
            .filter(|e| e.completed)
            .map(|e| e.title.as_str())
            .collect();

        let mut completed = Vec::new();
        let mut in_progress = Vec::new();
        let mut not_started = Vec::new();
        for course in &pathway.recommended_courses {
            if completed_titles.contains(course.as_str()) {
                completed.push(course.clone());
            } else if enrolled_titles.contains(course.as_str()) {
                in_progress.push(course.clone());
            } else {
                not_started.push(course.clone());
            }
        }

        let total = pathway.recommended_courses.len();
        let completion_percentage = if total == 0 {
            0.0
        } else {
            round_tenth(completed.len() as f64 / total as f64 * 100.0)
        };

        let known: HashSet<String> = interests.iter().map(|i| i.to_lowercase()).collect();
        let mut skill_gaps: Vec<String> = pathway
            .recommended_skills
            .iter()
            .filter(|skill| !known.contains(&skill.to_lowercase()))
            .cloned()
            .collect();
        skill_gaps.sort();
        skill_gaps.dedup();

        let mut next_steps = Vec::new();
        if let Some(first) = not_started.first() {
            next_steps.push(format!("Enroll in: {first}"));
        }
        if let Some(first) = in_progress.first() {
            next_steps.push(format!("Complete ongoing course: {first}"));
        }
        if !skill_gaps.is_empty() {
            let top: Vec<&str> = skill_gaps.iter().take(3).map(String::as_str).collect();
            next_steps.push(format!("Build skills in: {}", top.join(", ")));
        }
        if total > 0 && completed.len() as f64 >= total as f64 * CERTIFICATION_THRESHOLD {
            if let Some(cert) = pathway.recommended_certs.first() {
                next_steps.push(format!("Consider pursuing: {cert}"));
            }
            next_steps.push("Start working on capstone project or thesis".to_string());
        }
        if next_steps.is_empty() {
            next_steps.push("You're on track! Continue with your current courses.".to_string());
            next_steps
                .push("Consider taking advanced electives in your area of interest.".to_string());
        }

        let remaining = not_started.len() + in_progress.len();
        let recommended_timeline = timeline(remaining).to_string();

        Self {
            target_career: pathway,
            current_progress: RoadmapProgress {
                completed_recommended_courses: completed,
                in_progress_recommended_courses: in_progress,
                not_started_recommended_courses: not_started,
                completion_percentage,
            },
            next_steps,
            skill_gaps,
            recommended_timeline,
        }
    }
}

fn timeline(courses_remaining: usize) -> &'static str {
    match courses_remaining {
        0 => "You've completed all recommended courses! Focus on certifications and practical projects.",
        1..=2 => "1-2 semesters remaining. Focus on completing final courses and building portfolio projects.",
        3..=4 => "2-3 semesters remaining. Stay consistent with coursework and start networking.",
        _ => "3-4 semesters remaining. Take 2-3 courses per semester and build foundational skills.",
    }
}
