use axum::Json;
use serde_json::{Value, json};

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello from the report backend!" }))
}

pub async fn hello() -> Json<Value> {
    Json(json!({ "message": "Hello from the backend API!" }))
}
