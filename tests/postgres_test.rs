mod common;

use common::*;
use dbprobe::queries::{self, HealthCheckRow};

fn assert_newest_first(rows: &[HealthCheckRow]) {
    assert!(rows.len() <= 5, "at most five rows: {rows:?}");
    assert!(
        rows.windows(2).all(|w| matches!(w, [a, b] if a.id > b.id)),
        "rows must be ordered by id descending: {rows:?}"
    );
}

#[tokio::test]
#[ignore = "requires running PostgreSQL container"]
async fn test_postgres_server_version() {
    if skip_if_no_postgres() {
        return;
    }

    let version = queries::server_version(&postgres_config()).await.unwrap();
    assert!(
        version.chars().any(|c| c.is_ascii_digit()),
        "Should contain version number: {version}"
    );
}

#[tokio::test]
#[ignore = "requires running PostgreSQL container"]
async fn test_postgres_round_trip_twice() {
    if skip_if_no_postgres() {
        return;
    }

    let config = postgres_config();
    let first = queries::round_trip(&config).await.unwrap();
    let second = queries::round_trip(&config).await.unwrap();

    assert!(!first.is_empty());
    assert!(second.len() >= first.len());
    assert_newest_first(&first);
    assert_newest_first(&second);

    let newest = second.first().unwrap();
    assert!(newest.id > first.first().unwrap().id);
    assert_eq!(newest.status.as_deref(), Some("healthy"));
    assert!(newest.timestamp.is_some());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL container"]
async fn test_postgres_round_trip_with_retain() {
    if skip_if_no_postgres() {
        return;
    }

    let mut config = postgres_config();
    config.retain = Some(2);

    let mut rows = Vec::new();
    for _ in 0..4 {
        rows = queries::round_trip(&config).await.unwrap();
        assert_newest_first(&rows);
    }

    assert!(rows.len() <= 2, "table not capped at 2 rows: {rows:?}");
    assert!(!rows.is_empty());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL container"]
async fn test_postgres_endpoints() {
    if skip_if_no_postgres() {
        return;
    }

    let port = spawn_server(postgres_config()).await;

    let (status, body) = fetch(port, "/db-test").await.unwrap();
    assert_eq!(status, 200, "{body}");
    assert_eq!(body["database_test"]["status"], "success");
    assert_eq!(body["database_test"]["connected"], true);
    assert!(body["database_test"]["version"].is_string());

    let (status, body) = fetch(port, "/db-query").await.unwrap();
    assert_eq!(status, 200, "{body}");
    assert_eq!(body["status"], "success");
    assert!(body["record_count"].as_u64().unwrap() >= 1);
    assert_eq!(body["data"][0]["status"], "healthy");
}

#[tokio::test]
#[ignore = "requires running PostgreSQL container"]
async fn test_postgres_wrong_password() {
    if skip_if_no_postgres() {
        return;
    }

    let mut config = postgres_config();
    config.password = "wrong".to_string();

    let port = spawn_server(config).await;
    let (status, body) = fetch(port, "/db-test").await.unwrap();
    assert_eq!(status, 503);
    assert_eq!(body["database_test"]["connected"], false);
}
