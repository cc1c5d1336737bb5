use axum::extract::State;
use axum::Json;

use crate::adapter::inbound::http::error::ApiResult;
use crate::adapter::inbound::http::extract::CurrentUser;
use crate::adapter::inbound::http::state::AppState;
use crate::application::admin::Overview;

pub async fn overview(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Overview>> {
    Ok(Json(state.admin.overview(&user).await?))
}
