//! Notification inbox routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::adapter::inbound::http::error::ApiResult;
use crate::adapter::inbound::http::extract::CurrentUser;
use crate::adapter::inbound::http::state::AppState;
use crate::domain::id::{NotificationId, ProfileId};
use crate::domain::notification::{Notification, NotificationDraft};

#[derive(Debug, Default, Deserialize)]
pub struct InboxQuery {
    #[serde(default)]
    pub unread_only: bool,
}

#[derive(Debug, Deserialize)]
pub struct SendBody {
    pub recipient_id: ProfileId,
    #[serde(flatten)]
    pub draft: NotificationDraft,
}

pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<InboxQuery>,
) -> ApiResult<Json<Vec<Notification>>> {
    Ok(Json(state.notifications.list(&user, query.unread_only).await?))
}

pub async fn send(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<SendBody>,
) -> ApiResult<(StatusCode, Json<Notification>)> {
    let sent = state
        .notifications
        .send(&user, &body.recipient_id, body.draft)
        .await?;
    Ok((StatusCode::CREATED, Json(sent)))
}

pub async fn mark_read(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<NotificationId>,
) -> ApiResult<Json<Notification>> {
    Ok(Json(state.notifications.mark_read(&user, &id).await?))
}

pub async fn mark_all_read(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Value>> {
    let updated = state.notifications.mark_all_read(&user).await?;
    Ok(Json(json!({ "updated": updated })))
}

pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<NotificationId>,
) -> ApiResult<StatusCode> {
    state.notifications.delete(&user, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
