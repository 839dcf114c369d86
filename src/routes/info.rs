use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use std::{collections::BTreeMap, sync::Arc};

use super::{APPLICATION, ENDPOINTS};
use crate::config::Config;

/// Non-secret settings, keyed by the environment variable they come from
#[derive(Serialize, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct EnvironmentVariables {
    pub aws_region: String,
    pub database_type: String,
    pub database_engine: String,
    pub database_host: String,
    pub database_port: String,
    pub database_name: String,
    pub server_port: u16,
}

impl From<&Config> for EnvironmentVariables {
    fn from(config: &Config) -> Self {
        Self {
            aws_region: config
                .region
                .clone()
                .unwrap_or_else(|| "not-set".to_string()),
            database_type: config.database_type.clone(),
            database_engine: config.engine.name().to_string(),
            database_host: config.host.clone(),
            database_port: config.port.clone(),
            database_name: config.database.clone(),
            server_port: config.server_port,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct Info {
    pub application: &'static str,
    pub version: &'static str,
    pub environment_variables: EnvironmentVariables,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

pub async fn info(State(config): State<Arc<Config>>) -> (StatusCode, Json<Info>) {
    (
        StatusCode::OK,
        Json(Info {
            application: APPLICATION,
            version: env!("CARGO_PKG_VERSION"),
            environment_variables: EnvironmentVariables::from(config.as_ref()),
            endpoints: ENDPOINTS.into_iter().collect(),
        }),
    )
}

#[derive(Serialize, Debug)]
pub struct Welcome {
    pub message: &'static str,
    pub status: &'static str,
    pub endpoints: Vec<&'static str>,
}

pub async fn root() -> (StatusCode, Json<Welcome>) {
    (
        StatusCode::OK,
        Json(Welcome {
            message: "ECS RDS Test Application",
            status: "running",
            endpoints: ENDPOINTS.iter().map(|(path, _)| *path).collect(),
        }),
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[tokio::test]
    async fn test_root() {
        let (status, Json(body)) = root().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "running");
        assert_eq!(
            body.endpoints,
            vec!["/health", "/db-test", "/db-query", "/info"]
        );
    }

    #[tokio::test]
    async fn test_info_reports_config() {
        let config = Arc::new(Config {
            host: "db.internal".to_string(),
            server_port: 9090,
            region: Some("us-east-1".to_string()),
            ..Config::default()
        });
        let (status, Json(body)) = info(State(config)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.application, APPLICATION);
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(body.environment_variables.database_host, "db.internal");
        assert_eq!(body.environment_variables.server_port, 9090);
        assert_eq!(body.environment_variables.aws_region, "us-east-1");
        assert_eq!(body.endpoints.len(), 4);
        assert_eq!(
            body.endpoints.get("/db-test"),
            Some(&"Test database connection")
        );
    }

    #[tokio::test]
    async fn test_info_serialization_omits_secrets() {
        let config = Arc::new(Config {
            password: "hunter2".to_string(),
            username: "root-user".to_string(),
            ..Config::default()
        });
        let (_, Json(body)) = info(State(config)).await;
        let json = serde_json::to_value(&body).unwrap();
        let vars = json["environment_variables"].as_object().unwrap();

        assert_eq!(vars["AWS_REGION"], "not-set");
        assert_eq!(vars["DATABASE_TYPE"], "rds");
        assert_eq!(vars["DATABASE_ENGINE"], "mysql");
        assert_eq!(vars["DATABASE_PORT"], "3306");
        assert_eq!(vars["DATABASE_NAME"], "testdb");
        assert_eq!(vars["SERVER_PORT"], 8080);

        let text = json.to_string();
        assert!(!text.contains("hunter2"));
        assert!(!text.contains("root-user"));
    }
}
