//! Unauthenticated service information.

use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "learnhub",
        "version": env!("CARGO_PKG_VERSION"),
        "description": env!("CARGO_PKG_DESCRIPTION"),
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
