pub mod mysql;
pub mod postgres;

use crate::{
    config::{Config, Engine},
    error::DbError,
};
use serde::Serialize;
use sqlx::ConnectOptions;
use std::time::{Duration, Instant};
use tokio::time;
use tracing::debug;

/// Diagnostic table created on demand
pub const TABLE_NAME: &str = "health_check";

/// Upper bound on establishing a connection
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Version string reported when the version query returns no row
pub const UNKNOWN_VERSION: &str = "Unknown";

/// Row read back from the diagnostic table
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthCheckRow {
    pub id: i64,
    pub timestamp: Option<String>,
    pub status: Option<String>,
}

/// Connect and return the server version string
///
/// # Errors
///
/// Returns an error if the engine is unsupported, the connection fails or the
/// version query fails
pub async fn server_version(config: &Config) -> Result<String, DbError> {
    let url = config.connection_url()?;
    match config.engine.resolve()? {
        Engine::MySql => mysql::server_version(&url).await,
        Engine::Postgres => postgres::server_version(&url).await,
    }
}

/// Create the diagnostic table if needed, record one row and read back the
/// newest ones
///
/// # Errors
///
/// Returns an error if any step fails; an insert that was already committed
/// is kept
pub async fn round_trip(config: &Config) -> Result<Vec<HealthCheckRow>, DbError> {
    let url = config.connection_url()?;
    match config.engine.resolve()? {
        Engine::MySql => mysql::round_trip(&url, config.retain).await,
        Engine::Postgres => postgres::round_trip(&url, config.retain).await,
    }
}

/// Open a single connection, bounded by [`CONNECT_TIMEOUT`]
pub(crate) async fn connect<O>(url: &str) -> Result<O::Connection, DbError>
where
    O: ConnectOptions,
    O::Connection: Sized,
{
    let options: O = url.parse().map_err(DbError::Connection)?;

    let start = Instant::now();
    let conn = time::timeout(CONNECT_TIMEOUT, options.connect())
        .await
        .map_err(|_| DbError::Timeout(CONNECT_TIMEOUT))?
        .map_err(DbError::Connection)?;

    debug!(elapsed_ms = start.elapsed().as_millis(), "connected");

    Ok(conn)
}

/// Lowest id to keep so that only the newest `retain` ids remain
#[must_use]
pub(crate) fn prune_threshold(max_id: Option<i32>, retain: u32) -> Option<i64> {
    let cutoff = i64::from(max_id?) - i64::from(retain);
    (cutoff > 0).then_some(cutoff)
}

pub(crate) fn to_row(
    (id, timestamp, status): (i32, Option<chrono::NaiveDateTime>, Option<String>),
) -> HealthCheckRow {
    HealthCheckRow {
        id: i64::from(id),
        timestamp: timestamp.map(|t| t.to_string()),
        status,
    }
}
