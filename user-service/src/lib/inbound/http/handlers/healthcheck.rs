use axum::Json;
use serde_json::json;
use serde_json::Value;

pub async fn healthcheck() -> Json<Value> {
    Json(json!({ "message": "pong" }))
}
