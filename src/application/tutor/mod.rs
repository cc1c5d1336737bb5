//! AI tutor.
//!
//! Answers student questions through the configured LLM when there is one,
//! and from canned keyword templates otherwise or when the provider fails.
//! Every exchange is stored as a tutor session.

pub mod config;
mod responses;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use config::TutorConfig;
pub use responses::template_response;

use crate::domain::activity::{ChatMessage, ChatRole, ResponseSource, TutorSession};
use crate::domain::error::bounded;
use crate::domain::id::CourseId;
use crate::domain::profile::Profile;
use crate::error::Result;
use crate::port::outbound::llm::Llm;
use crate::port::outbound::store::{ActivityStore, CatalogStore};

/// A question for the tutor.
#[derive(Debug, Clone, Deserialize)]
pub struct TutorRequest {
    pub question: String,
    #[serde(default)]
    pub course_id: Option<CourseId>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub conversation_history: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TutorReply {
    pub response: String,
    pub source: ResponseSource,
    pub timestamp: DateTime<Utc>,
}

pub struct TutorService {
    catalog: Arc<dyn CatalogStore>,
    activities: Arc<dyn ActivityStore>,
    llm: Option<Arc<dyn Llm>>,
    config: TutorConfig,
}

impl TutorService {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        activities: Arc<dyn ActivityStore>,
        llm: Option<Arc<dyn Llm>>,
        config: TutorConfig,
    ) -> Self {
        Self {
            catalog,
            activities,
            llm,
            config,
        }
    }

    /// Provider behind the tutor, or `"templates"` without one.
    pub fn backend(&self) -> &'static str {
        self.llm.as_ref().map_or("templates", |llm| llm.name())
    }

    pub async fn ask(&self, actor: &Profile, request: TutorRequest) -> Result<TutorReply> {
        let question = bounded(
            "question",
            &request.question,
            1,
            self.config.max_question_length,
        )?;

        let course_info = match &request.course_id {
            Some(id) => self.catalog.get_course(id).await?.map(|c| c.info_line()),
            None => None,
        };

        let (response, source) = match &self.llm {
            Some(llm) => {
                let system = system_prompt(course_info.as_deref(), request.context.as_deref());
                let messages = self.messages(&request.conversation_history, &question);
                match llm.chat(&system, &messages).await {
                    Ok(answer) => {
                        debug!(provider = llm.name(), "Tutor answered by LLM");
                        (answer, ResponseSource::Llm)
                    }
                    Err(e) => {
                        warn!(provider = llm.name(), error = %e, "LLM call failed, using template");
                        (
                            template_response(&question, course_info.as_deref()),
                            ResponseSource::Template,
                        )
                    }
                }
            }
            None => (
                template_response(&question, course_info.as_deref()),
                ResponseSource::Template,
            ),
        };

        let now = Utc::now();
        let session = TutorSession::record(
            actor.id.clone(),
            request.course_id.filter(|_| course_info.is_some()),
            &question,
            &response,
            source,
            now,
        );
        self.activities.insert_tutor_session(&session).await?;

        Ok(TutorReply {
            response,
            source,
            timestamp: now,
        })
    }

    /// The trailing history window followed by the new question. System
    /// turns in the history are dropped; the prompt carries the instructions.
    fn messages(&self, history: &[ChatMessage], question: &str) -> Vec<ChatMessage> {
        let turns: Vec<&ChatMessage> = history
            .iter()
            .filter(|m| m.role != ChatRole::System)
            .collect();
        let skip = turns.len().saturating_sub(self.config.history_window);
        turns
            .into_iter()
            .skip(skip)
            .cloned()
            .chain(std::iter::once(ChatMessage::user(question)))
            .collect()
    }
}

fn system_prompt(course_info: Option<&str>, context: Option<&str>) -> String {
    let mut extra = String::new();
    if let Some(info) = course_info {
        extra.push_str(&format!("\nCurrent Context: {info}"));
    }
    if let Some(context) = context.map(str::trim).filter(|c| !c.is_empty()) {
        extra.push_str(&format!("\nAdditional Context: {context}"));
    }
    format!(
        "You are an expert AI tutor for an intelligent learning platform. Your role is to help students understand complex topics by:

1. Providing clear, accurate, and educational explanations
2. Breaking down complex concepts into digestible parts
3. Using relevant examples and analogies
4. Encouraging critical thinking with guiding questions
5. Adapting your explanations to the student's level
6. Being patient, encouraging, and supportive
{extra}

Guidelines:
- Keep responses focused and concise (2-4 paragraphs)
- Use markdown formatting for better readability
- Include examples when helpful
- If the question is unclear, ask clarifying questions
- For coding questions, provide clear code examples with explanations
- Always encourage further questions and deeper learning"
    )
}
