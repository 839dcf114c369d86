//! HTTP handlers. Every response body is JSON.

pub mod database;
pub mod health;
pub mod info;

pub use database::{db_query, db_test};
pub use health::health;
pub use info::{info, root};

use axum::{Json, http::StatusCode};
use serde_json::{Value, json};

/// Application name reported in response bodies
pub const APPLICATION: &str = "ECS RDS Test App";

/// Routes advertised by `/` and `/info`, with their descriptions
pub const ENDPOINTS: [(&str, &str); 4] = [
    ("/health", "Health check endpoint"),
    ("/db-test", "Test database connection"),
    ("/db-query", "Execute simple database query"),
    ("/info", "Application information"),
];

pub async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "status": "error", "message": "Not found" })),
    )
}
