//! Enrollment, progress and certificate routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::adapter::inbound::http::error::ApiResult;
use crate::adapter::inbound::http::extract::CurrentUser;
use crate::adapter::inbound::http::state::AppState;
use crate::application::enrollment::{CertificationView, EnrollmentView, ProgressOutcome};
use crate::domain::enrollment::Enrollment;
use crate::domain::id::{CourseId, EnrollmentId, ModuleId};

#[derive(Debug, Deserialize)]
pub struct EnrollBody {
    pub course_id: CourseId,
}

#[derive(Debug, Deserialize)]
pub struct ProgressBody {
    pub progress: f64,
}

pub async fn enroll(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<EnrollBody>,
) -> ApiResult<(StatusCode, Json<Enrollment>)> {
    let enrollment = state.enrollments.enroll(&user, &body.course_id).await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<EnrollmentView>>> {
    Ok(Json(state.enrollments.list(&user).await?))
}

pub async fn update_progress(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<EnrollmentId>,
    Json(body): Json<ProgressBody>,
) -> ApiResult<Json<ProgressOutcome>> {
    let outcome = state
        .enrollments
        .update_progress(&user, &id, body.progress)
        .await?;
    Ok(Json(outcome))
}

pub async fn complete_module(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((id, module_id)): Path<(EnrollmentId, ModuleId)>,
) -> ApiResult<Json<ProgressOutcome>> {
    let outcome = state
        .enrollments
        .complete_module(&user, &id, &module_id)
        .await?;
    Ok(Json(outcome))
}

pub async fn unenroll(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<EnrollmentId>,
) -> ApiResult<StatusCode> {
    state.enrollments.unenroll(&user, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn certifications(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<CertificationView>>> {
    Ok(Json(state.enrollments.certifications(&user).await?))
}
