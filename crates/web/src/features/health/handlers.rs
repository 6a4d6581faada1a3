use axum::Json;
use serde_json::{Value, json};

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is running")
    ),
    tag = "health"
)]
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "App is running"
    }))
}
