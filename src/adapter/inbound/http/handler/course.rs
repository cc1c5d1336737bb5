//! Catalog routes: courses, modules and course quizzes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::adapter::inbound::http::error::ApiResult;
use crate::adapter::inbound::http::extract::CurrentUser;
use crate::adapter::inbound::http::state::AppState;
use crate::application::quiz::QuizView;
use crate::domain::course::{Course, CourseDraft, CourseModule, CourseUpdate, ModuleDraft};
use crate::domain::id::CourseId;

#[derive(Debug, Default, Deserialize)]
pub struct CourseQuery {
    pub category: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
}

pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<CourseQuery>,
) -> ApiResult<Json<Vec<Course>>> {
    let courses = state
        .catalog
        .list(&user, query.category, query.include_inactive)
        .await?;
    Ok(Json(courses))
}

/// Active courses the caller has not enrolled in.
pub async fn available(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<Course>>> {
    Ok(Json(state.enrollments.available(&user).await?))
}

pub async fn get(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<CourseId>,
) -> ApiResult<Json<Course>> {
    Ok(Json(state.catalog.get(&user, &id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(draft): Json<CourseDraft>,
) -> ApiResult<(StatusCode, Json<Course>)> {
    let course = state.catalog.create(&user, draft).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<CourseId>,
    Json(update): Json<CourseUpdate>,
) -> ApiResult<Json<Course>> {
    Ok(Json(state.catalog.update(&user, &id, update).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<CourseId>,
) -> ApiResult<StatusCode> {
    state.catalog.delete(&user, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn modules(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<CourseId>,
) -> ApiResult<Json<Vec<CourseModule>>> {
    Ok(Json(state.catalog.modules(&user, &id).await?))
}

pub async fn add_module(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<CourseId>,
    Json(draft): Json<ModuleDraft>,
) -> ApiResult<(StatusCode, Json<CourseModule>)> {
    let module = state.catalog.add_module(&user, &id, draft).await?;
    Ok((StatusCode::CREATED, Json(module)))
}

pub async fn quizzes(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<CourseId>,
) -> ApiResult<Json<Vec<QuizView>>> {
    Ok(Json(state.quizzes.list_for_course(&user, &id).await?))
}
