//! The AI routes: tutor, quiz generation and attempts, research assistant.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::adapter::inbound::http::error::ApiResult;
use crate::adapter::inbound::http::extract::CurrentUser;
use crate::adapter::inbound::http::state::AppState;
use crate::application::quiz::{AttemptResult, GeneratedQuiz, QuizRequest, QuizView};
use crate::application::research::{self, Guidance, GuidanceRequest, ResearchQuery, ResearchResults};
use crate::application::tutor::{TutorReply, TutorRequest};
use crate::domain::id::QuizId;

#[derive(Debug, Deserialize)]
pub struct AttemptBody {
    pub answers: Vec<usize>,
}

pub async fn tutor(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<TutorRequest>,
) -> ApiResult<Json<TutorReply>> {
    Ok(Json(state.tutor.ask(&user, request).await?))
}

pub async fn generate_quiz(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<QuizRequest>,
) -> ApiResult<(StatusCode, Json<GeneratedQuiz>)> {
    let generated = state.quizzes.generate(&user, request).await?;
    Ok((StatusCode::CREATED, Json(generated)))
}

pub async fn quiz(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<QuizId>,
) -> ApiResult<Json<QuizView>> {
    Ok(Json(state.quizzes.get(&user, &id).await?))
}

pub async fn attempt(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<QuizId>,
    Json(body): Json<AttemptBody>,
) -> ApiResult<(StatusCode, Json<AttemptResult>)> {
    let result = state.quizzes.attempt(&user, &id, body.answers).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

pub async fn research(
    CurrentUser(_): CurrentUser,
    Json(query): Json<ResearchQuery>,
) -> ApiResult<Json<ResearchResults>> {
    Ok(Json(research::search(query)?))
}

pub async fn guidance(
    CurrentUser(_): CurrentUser,
    Json(request): Json<GuidanceRequest>,
) -> ApiResult<Json<Guidance>> {
    Ok(Json(research::guidance(request)?))
}
