//! Sign-up, sign-in and password recovery.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::adapter::inbound::http::error::ApiResult;
use crate::adapter::inbound::http::extract::BearerToken;
use crate::adapter::inbound::http::state::AppState;
use crate::application::auth::{SignUp, SignedIn};
use crate::domain::profile::{Profile, Role};

#[derive(Debug, Deserialize)]
pub struct SignUpBody {
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize)]
pub struct SignInBody {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetRequestBody {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetConfirmBody {
    pub token: String,
    pub new_password: String,
}

pub async fn sign_up(
    State(state): State<AppState>,
    Json(body): Json<SignUpBody>,
) -> ApiResult<(StatusCode, Json<Profile>)> {
    let profile = state
        .auth
        .sign_up(SignUp {
            email: body.email,
            password: body.password,
            full_name: body.full_name,
            role: body.role,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn sign_in(
    State(state): State<AppState>,
    Json(body): Json<SignInBody>,
) -> ApiResult<Json<SignedIn>> {
    Ok(Json(state.auth.sign_in(&body.email, &body.password).await?))
}

pub async fn sign_out(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> ApiResult<Json<Value>> {
    let signed_out = state.auth.sign_out(&token).await?;
    Ok(Json(json!({ "signed_out": signed_out })))
}

pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(body): Json<ResetRequestBody>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    state.auth.request_password_reset(&body.email).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(json!({
            "message": "If the email is registered, a reset token has been sent."
        })),
    ))
}

pub async fn confirm_password_reset(
    State(state): State<AppState>,
    Json(body): Json<ResetConfirmBody>,
) -> ApiResult<Json<Value>> {
    state
        .auth
        .reset_password(&body.token, &body.new_password)
        .await?;
    Ok(Json(json!({ "message": "Password updated. Please sign in again." })))
}
