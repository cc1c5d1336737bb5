//! Personalized course recommendations.
//!
//! Suggestions are built from the categories a student is already studying,
//! topped up with beginner courses and then anything else available.

use std::collections::HashSet;
use std::sync::Arc;

use rand::Rng;
use serde::Serialize;

use crate::domain::course::{Course, Difficulty};
use crate::domain::enrollment::Enrollment;
use crate::domain::id::CourseId;
use crate::domain::pathway::CareerRecommendation;
use crate::domain::profile::Profile;
use crate::error::Result;
use crate::port::outbound::store::{CatalogStore, CourseFilter, EnrollmentStore, PathwayStore};

/// Active, not-enrolled courses considered.
const CANDIDATE_POOL: usize = 20;
const PER_CATEGORY: usize = 2;
const BEGINNER_PICKS: usize = 2;
const FILLER_PICKS: usize = 3;
const MAX_RECOMMENDATIONS: usize = 6;
/// Progress at which a category counts as completed.
const COMPLETED_PROGRESS: f64 = 80.0;

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub course: Course,
    pub recommendation_reason: String,
    pub match_score: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UserStats {
    pub enrolled_courses: usize,
    pub average_progress: f64,
    pub categories_explored: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendations {
    pub recommendations: Vec<Recommendation>,
    pub user_stats: UserStats,
}

pub struct RecommendationService {
    catalog: Arc<dyn CatalogStore>,
    enrollments: Arc<dyn EnrollmentStore>,
    pathways: Arc<dyn PathwayStore>,
}

impl RecommendationService {
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

    pub async fn recommend(&self, actor: &Profile) -> Result<Recommendations> {
        let enrollments = self.enrollments.list_enrollments_for(&actor.id).await?;
        let mut history = Vec::with_capacity(enrollments.len());
        for enrollment in enrollments {
            let category = self
                .catalog
                .get_course(&enrollment.course_id)
                .await?
                .map(|c| c.category);
            history.push((enrollment, category));
        }

        let enrolled: HashSet<&CourseId> = history.iter().map(|(e, _)| &e.course_id).collect();
        let available: Vec<Course> = self
            .catalog
            .list_courses(&CourseFilter::default())
            .await?
            .into_iter()
            .filter(|c| !enrolled.contains(&c.id))
            .take(CANDIDATE_POOL)
            .collect();

        Ok(build(&history, available, &mut rand::thread_rng()))
    }

    /// Stored recommendations, newest first.
    pub async fn saved(&self, actor: &Profile) -> Result<Vec<CareerRecommendation>> {
        self.pathways.list_recommendations_for(&actor.id).await
    }
}

/// Pick and explain up to six courses from `available`.
///
/// `history` pairs each enrollment with its course category, when the
/// course still exists.
fn build(
    history: &[(Enrollment, Option<String>)],
    available: Vec<Course>,
    rng: &mut impl Rng,
) -> Recommendations {
    let mut enrolled_categories: Vec<&str> = Vec::new();
    let mut completed_any = false;
    for (enrollment, category) in history {
        if let Some(category) = category {
            if !enrolled_categories.contains(&category.as_str()) {
                enrolled_categories.push(category);
            }
            if enrollment.progress >= COMPLETED_PROGRESS {
                completed_any = true;
            }
        }
    }

    let mut picked: Vec<usize> = Vec::new();
    for category in &enrolled_categories {
        picked.extend(
            available
                .iter()
                .enumerate()
                .filter(|(_, c)| c.category == *category)
                .map(|(i, _)| i)
                .take(PER_CATEGORY),
        );
    }
    let beginners: Vec<usize> = available
        .iter()
        .enumerate()
        .filter(|(i, c)| c.difficulty == Difficulty::Beginner && !picked.contains(i))
        .map(|(i, _)| i)
        .take(BEGINNER_PICKS)
        .collect();
    picked.extend(beginners);
    let fillers: Vec<usize> = (0..available.len())
        .filter(|i| !picked.contains(i))
        .take(FILLER_PICKS)
        .collect();
    picked.extend(fillers);
    picked.truncate(MAX_RECOMMENDATIONS);

    let recommendations = picked
        .into_iter()
        .map(|i| {
            let course = available[i].clone();
            let recommendation_reason = if enrolled_categories.contains(&course.category.as_str()) {
                format!("Continue your {} learning journey", course.category)
            } else if course.difficulty == Difficulty::Beginner {
                "Great for expanding your skills".to_string()
            } else if completed_any {
                "Next step in your learning path".to_string()
            } else {
                "Recommended for you".to_string()
            };
            Recommendation {
                course,
                recommendation_reason,
                match_score: rng.gen_range(70..=99),
            }
        })
        .collect();

    let average_progress = if history.is_empty() {
        0.0
    } else {
        (history.iter().map(|(e, _)| e.progress).sum::<f64>() / history.len() as f64).round()
    };

    Recommendations {
        recommendations,
        user_stats: UserStats {
            enrolled_courses: history.len(),
            average_progress,
            categories_explored: enrolled_categories.len(),
        },
    }
}
