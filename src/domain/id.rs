//! Domain identifier types with proper encapsulation.
//!
//! Every row in the store is keyed by a UUID v4 rendered as text. Each
//! entity gets its own newtype so a course id can never be passed where a
//! profile id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Get the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

uuid_id!(
    /// Identifier of a user profile (student, faculty or admin).
    ProfileId
);
uuid_id!(
    /// Identifier of a course.
    CourseId
);
uuid_id!(
    /// Identifier of a module within a course.
    ModuleId
);
uuid_id!(
    /// Identifier of a student's enrollment in a course.
    EnrollmentId
);
uuid_id!(
    /// Identifier of an issued certificate.
    CertificationId
);
uuid_id!(
    /// Identifier of a notification.
    NotificationId
);
uuid_id!(
    /// Identifier of a generated quiz.
    QuizId
);
uuid_id!(
    /// Identifier of a quiz attempt.
    AttemptId
);
uuid_id!(
    /// Identifier of a recorded study session.
    ActivityId
);
uuid_id!(
    /// Identifier of a stored tutor exchange.
    TutorSessionId
);
uuid_id!(
    /// Identifier of a learning pathway (career path).
    PathwayId
);
uuid_id!(
    /// Identifier of a stored recommendation.
    RecommendationId
);
