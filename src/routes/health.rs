use axum::{Json, http::StatusCode};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
}

/// Liveness probe, independent of the database
pub async fn health() -> (StatusCode, Json<Health>) {
    (
        StatusCode::OK,
        Json(Health {
            status: "healthy",
            message: "Application is running",
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        }),
    )
}
