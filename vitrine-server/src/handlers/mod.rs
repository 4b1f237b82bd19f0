//! Request handlers, split by surface.

pub mod albums;
pub mod photos;
pub mod public;
pub mod upload;

use axum::Json;
use serde_json::{Value, json};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
