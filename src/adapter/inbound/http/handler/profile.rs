//! The caller's profile and admin role management.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::adapter::inbound::http::error::ApiResult;
use crate::adapter::inbound::http::extract::CurrentUser;
use crate::adapter::inbound::http::state::AppState;
use crate::domain::id::ProfileId;
use crate::domain::profile::{Profile, ProfileUpdate, Role};

#[derive(Debug, Deserialize)]
pub struct RoleBody {
    pub role: Role,
}

pub async fn me(CurrentUser(user): CurrentUser) -> Json<Profile> {
    Json(user)
}

pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(update): Json<ProfileUpdate>,
) -> ApiResult<Json<Profile>> {
    Ok(Json(state.profiles.update(&user, update).await?))
}

pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<Profile>>> {
    Ok(Json(state.profiles.list(&user).await?))
}

pub async fn set_role(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<ProfileId>,
    Json(body): Json<RoleBody>,
) -> ApiResult<Json<Profile>> {
    Ok(Json(state.profiles.set_role(&user, &id, body.role).await?))
}
