//! Recommendations and career roadmaps.

use axum::extract::{Path, State};
use axum::Json;

use crate::adapter::inbound::http::error::ApiResult;
use crate::adapter::inbound::http::extract::CurrentUser;
use crate::adapter::inbound::http::state::AppState;
use crate::application::recommendation::Recommendations;
use crate::domain::pathway::{CareerRecommendation, LearningPathway, Roadmap};

pub async fn recommendations(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Recommendations>> {
    Ok(Json(state.recommendations.recommend(&user).await?))
}

pub async fn saved_recommendations(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<CareerRecommendation>>> {
    Ok(Json(state.recommendations.saved(&user).await?))
}

pub async fn list(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
) -> ApiResult<Json<Vec<LearningPathway>>> {
    Ok(Json(state.careers.list().await?))
}

pub async fn get(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
    Path(name): Path<String>,
) -> ApiResult<Json<LearningPathway>> {
    Ok(Json(state.careers.get(&name).await?))
}

pub async fn roadmap(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Roadmap>> {
    Ok(Json(state.careers.roadmap(&user).await?))
}
