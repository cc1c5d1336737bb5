//! Study time tracking and tutor conversation records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{ActivityId, CourseId, ProfileId, TutorSessionId};

/// Upper bound on minutes logged for one day.
pub const MAX_DAILY_MINUTES: i64 = 24 * 60;

/// Characters of the question kept as the session topic.
const TOPIC_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyActivity {
    pub id: ActivityId,
    pub student_id: ProfileId,
    pub course_id: Option<CourseId>,
    pub date: NaiveDate,
    pub minutes: i32,
    pub created_at: DateTime<Utc>,
}

impl StudyActivity {
    pub fn new(
        student_id: ProfileId,
        course_id: Option<CourseId>,
        date: NaiveDate,
        minutes: i64,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if !(1..=MAX_DAILY_MINUTES).contains(&minutes) {
            return Err(DomainError::OutOfRange {
                field: "minutes",
                value: minutes,
                min: 1,
                max: MAX_DAILY_MINUTES,
            });
        }
        Ok(Self {
            id: ActivityId::new(),
            student_id,
            course_id,
            date,
            minutes: minutes as i32,
            created_at: now,
        })
    }
}

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ChatMessage {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            timestamp: None,
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            timestamp: None,
        }
    }

    #[must_use]
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Where a tutor answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseSource {
    Llm,
    Template,
}

impl ResponseSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Llm => "llm",
            Self::Template => "template",
        }
    }
}

impl fmt::Display for ResponseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseSource {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "llm" => Ok(Self::Llm),
            "template" => Ok(Self::Template),
            other => Err(DomainError::InvalidChoice {
                field: "source",
                value: other.to_string(),
                expected: "llm, template",
            }),
        }
    }
}

/// One persisted question/answer exchange with the tutor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorSession {
    pub id: TutorSessionId,
    pub student_id: ProfileId,
    pub course_id: Option<CourseId>,
    pub conversation: Vec<ChatMessage>,
    pub topic_covered: String,
    pub source: ResponseSource,
    pub created_at: DateTime<Utc>,
}

impl TutorSession {
    #[must_use]
    pub fn record(
        student_id: ProfileId,
        course_id: Option<CourseId>,
        question: &str,
        answer: &str,
        source: ResponseSource,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TutorSessionId::new(),
            student_id,
            course_id,
            conversation: vec![
                ChatMessage::user(question).at(now),
                ChatMessage::assistant(answer).at(now),
            ],
            topic_covered: question.chars().take(TOPIC_CHARS).collect(),
            source,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_are_bounded() {
        let today = Utc::now().date_naive();
        let ok = StudyActivity::new(ProfileId::new(), None, today, 1440, Utc::now());
        assert!(ok.is_ok());
        for bad in [0, -5, 1441] {
            assert!(matches!(
                StudyActivity::new(ProfileId::new(), None, today, bad, Utc::now()),
                Err(DomainError::OutOfRange { field: "minutes", .. })
            ));
        }
    }

    #[test]
    fn topic_truncates_on_char_boundary() {
        let question = "é".repeat(150);
        let session = TutorSession::record(
            ProfileId::new(),
            None,
            &question,
            "answer",
            ResponseSource::Template,
            Utc::now(),
        );
        assert_eq!(session.topic_covered.chars().count(), 100);
        assert_eq!(session.conversation.len(), 2);
        assert_eq!(session.conversation[0].role, ChatRole::User);
        assert_eq!(session.conversation[1].role, ChatRole::Assistant);
    }
}
