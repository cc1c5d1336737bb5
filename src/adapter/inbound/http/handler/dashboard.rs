use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::adapter::inbound::http::error::ApiResult;
use crate::adapter::inbound::http::extract::CurrentUser;
use crate::adapter::inbound::http::state::AppState;
use crate::application::dashboard::Dashboard;
use crate::domain::activity::StudyActivity;
use crate::domain::id::CourseId;

#[derive(Debug, Deserialize)]
pub struct ActivityBody {
    pub minutes: i64,
    #[serde(default)]
    pub course_id: Option<CourseId>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

pub async fn dashboard(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Dashboard>> {
    Ok(Json(state.dashboard.dashboard(&user).await?))
}

pub async fn record_activity(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<ActivityBody>,
) -> ApiResult<(StatusCode, Json<StudyActivity>)> {
    let activity = state
        .dashboard
        .record_activity(&user, body.minutes, body.course_id, body.date)
        .await?;
    Ok((StatusCode::CREATED, Json(activity)))
}
