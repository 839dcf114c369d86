use chrono::NaiveDateTime;
use sqlx::{Connection, mysql::MySqlConnectOptions};
use tracing::debug;

use super::{HealthCheckRow, UNKNOWN_VERSION, connect, prune_threshold, to_row};
use crate::error::DbError;

pub const VERSION_QUERY: &str = "SELECT VERSION()";

pub const CREATE_TABLE: &str = r"CREATE TABLE IF NOT EXISTS health_check (
    id INT AUTO_INCREMENT PRIMARY KEY,
    timestamp DATETIME DEFAULT CURRENT_TIMESTAMP,
    status VARCHAR(50)
)";

const INSERT: &str = "INSERT INTO health_check (status) VALUES ('healthy')";

const SELECT_RECENT: &str = "SELECT id, timestamp, status FROM health_check ORDER BY id DESC LIMIT 5";

const MAX_ID: &str = "SELECT MAX(id) FROM health_check";

const PRUNE: &str = "DELETE FROM health_check WHERE id <= ?";

/// Connect and fetch the server version
///
/// # Errors
///
/// Returns an error if the connection or the version query fails
pub async fn server_version(url: &str) -> Result<String, DbError> {
    let mut conn = connect::<MySqlConnectOptions>(url).await?;

    let version: Option<String> = sqlx::query_scalar(VERSION_QUERY)
        .fetch_optional(&mut conn)
        .await
        .map_err(DbError::Query)?;

    let _ = conn.close().await;

    Ok(version.unwrap_or_else(|| UNKNOWN_VERSION.to_string()))
}

/// Write one row to the diagnostic table and read back the newest five
///
/// # Errors
///
/// Returns an error if the connection or any statement fails
pub async fn round_trip(url: &str, retain: Option<u32>) -> Result<Vec<HealthCheckRow>, DbError> {
    let mut conn = connect::<MySqlConnectOptions>(url).await?;

    sqlx::query(CREATE_TABLE)
        .execute(&mut conn)
        .await
        .map_err(DbError::Query)?;

    let mut tx = conn.begin().await.map_err(DbError::Query)?;
    sqlx::query(INSERT)
        .execute(&mut *tx)
        .await
        .map_err(DbError::Query)?;
    tx.commit().await.map_err(DbError::Query)?;

    if let Some(retain) = retain {
        let max_id: Option<i32> = sqlx::query_scalar(MAX_ID)
            .fetch_one(&mut conn)
            .await
            .map_err(DbError::Query)?;

        if let Some(threshold) = prune_threshold(max_id, retain) {
            let deleted = sqlx::query(PRUNE)
                .bind(threshold)
                .execute(&mut conn)
                .await
                .map_err(DbError::Query)?;
            debug!(rows = deleted.rows_affected(), "pruned health_check");
        }
    }

    let rows: Vec<(i32, Option<NaiveDateTime>, Option<String>)> = sqlx::query_as(SELECT_RECENT)
        .fetch_all(&mut conn)
        .await
        .map_err(DbError::Query)?;

    let _ = conn.close().await;

    Ok(rows.into_iter().map(to_row).collect())
}
