//! Core domain types with no infrastructure dependencies.
//!
//! - [`profile`] - Users and their roles
//! - [`account`] - Credentials, sessions and reset tokens
//! - [`course`] - Catalog courses and ordered modules
//! - [`enrollment`] - Progress tracking and certificates
//! - [`notification`] - Reminders and system notices
//! - [`quiz`] - Generated quizzes and grading
//! - [`activity`] - Study time and tutor conversations
//! - [`pathway`] - Career pathways and roadmaps

pub mod account;
pub mod activity;
pub mod course;
pub mod enrollment;
pub mod error;
pub mod id;
pub mod notification;
pub mod pathway;
pub mod profile;
pub mod quiz;

/// Round to one decimal place.
#[must_use]
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::round_tenth;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_tenth(66.666), 66.7);
        assert_eq!(round_tenth(12.25), 12.3);
        assert_eq!(round_tenth(0.0), 0.0);
    }
}
