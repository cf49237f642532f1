/*
 * Responsibility
 * - GET /health (疎通用)
 * - access token gate の外に置く公開 route
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
