use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::main_lib::AppState;

/// Service banner served at the root path.
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "fundpulse data service", "status": "running" }))
}

/// Liveness probe.
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health_check))
}
