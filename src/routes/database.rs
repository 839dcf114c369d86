use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use super::APPLICATION;
use crate::{
    config::Config,
    error::DbError,
    queries::{self, HealthCheckRow},
};

const SKIPPED_MESSAGE: &str = "No database configuration provided";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
    Skipped,
}

/// Result of one connectivity check
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ConnectionOutcome {
    pub status: Status,
    pub message: String,
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConnectionOutcome {
    #[must_use]
    pub fn skipped() -> Self {
        Self {
            status: Status::Skipped,
            message: SKIPPED_MESSAGE.to_string(),
            connected: false,
            engine: None,
            host: None,
            port: None,
            database: None,
            version: None,
            error: None,
        }
    }

    #[must_use]
    pub fn connected(config: &Config, version: String) -> Self {
        Self {
            status: Status::Success,
            message: "Database connection successful".to_string(),
            connected: true,
            version: Some(version),
            ..Self::echo(config)
        }
    }

    #[must_use]
    pub fn failed(config: &Config, err: &DbError) -> Self {
        Self {
            status: Status::Error,
            message: format!("Database connection failed: {err}"),
            connected: false,
            error: Some(err.to_string()),
            ..Self::echo(config)
        }
    }

    fn echo(config: &Config) -> Self {
        Self {
            engine: Some(config.engine.name().to_string()),
            host: Some(config.host.clone()),
            port: Some(config.port.clone()),
            database: Some(config.database.clone()),
            ..Self::skipped()
        }
    }

    /// 200 when connected or skipped, 503 otherwise
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self.status {
            Status::Success | Status::Skipped => StatusCode::OK,
            Status::Error => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Run the connectivity check for the configured database
pub async fn check_connection(config: &Config) -> ConnectionOutcome {
    if !config.is_database_configured() {
        return ConnectionOutcome::skipped();
    }

    match queries::server_version(config).await {
        Ok(version) => {
            info!(engine = config.engine.name(), %version, "database connection successful");
            ConnectionOutcome::connected(config, version)
        }
        Err(e) => {
            warn!(engine = config.engine.name(), kind = e.kind(), error = %e, "database connection failed");
            ConnectionOutcome::failed(config, &e)
        }
    }
}

#[derive(Serialize, Debug)]
pub struct Environment {
    pub aws_region: String,
    pub database_type: String,
    pub database_engine: String,
}

#[derive(Serialize, Debug)]
pub struct DbTestResponse {
    pub application: &'static str,
    pub database_test: ConnectionOutcome,
    pub environment: Environment,
}

pub async fn db_test(State(config): State<Arc<Config>>) -> (StatusCode, Json<DbTestResponse>) {
    let outcome = check_connection(&config).await;

    (
        outcome.status_code(),
        Json(DbTestResponse {
            application: APPLICATION,
            database_test: outcome,
            environment: Environment {
                aws_region: config
                    .region
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string()),
                database_type: config.database_type.clone(),
                database_engine: config.engine.name().to_string(),
            },
        }),
    )
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DbQueryResponse {
    pub status: Status,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<HealthCheckRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DbQueryResponse {
    #[must_use]
    pub fn skipped() -> Self {
        Self {
            status: Status::Skipped,
            message: SKIPPED_MESSAGE.to_string(),
            data: None,
            record_count: None,
            error: None,
        }
    }

    #[must_use]
    pub fn success(rows: Vec<HealthCheckRow>) -> Self {
        Self {
            status: Status::Success,
            message: "Database query executed successfully".to_string(),
            record_count: Some(rows.len()),
            data: Some(rows),
            error: None,
        }
    }

    #[must_use]
    pub fn failed(err: &DbError) -> Self {
        Self {
            status: Status::Error,
            message: format!("Database query failed: {err}"),
            data: None,
            record_count: None,
            error: Some(err.to_string()),
        }
    }
}

pub async fn db_query(State(config): State<Arc<Config>>) -> (StatusCode, Json<DbQueryResponse>) {
    if !config.is_database_configured() {
        return (StatusCode::OK, Json(DbQueryResponse::skipped()));
    }

    match queries::round_trip(&config).await {
        Ok(rows) => {
            info!(engine = config.engine.name(), records = rows.len(), "database query executed");
            (StatusCode::OK, Json(DbQueryResponse::success(rows)))
        }
        Err(e) => {
            warn!(engine = config.engine.name(), kind = e.kind(), error = %e, "database query failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DbQueryResponse::failed(&e)),
            )
        }
    }
}
