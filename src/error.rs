use std::time::Duration;

/// Failures of a single diagnostic request against the database
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Unsupported database engine: {0}")]
    UnsupportedEngine(String),

    /// Network, authentication or malformed URI
    #[error("{0}")]
    Connection(#[source] sqlx::Error),

    #[error("connection timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("{0}")]
    Query(#[source] sqlx::Error),
}

impl DbError {
    /// Short label used in logs
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedEngine(_) => "unsupported_engine",
            Self::Connection(_) => "connection",
            Self::Timeout(_) => "timeout",
            Self::Query(_) => "query",
        }
    }
}
