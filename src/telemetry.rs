use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Map the `-v` count to a log level
#[must_use]
pub const fn level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Default filter when `RUST_LOG` is not set
#[must_use]
pub fn default_directives(verbosity: u8) -> String {
    let level = level(verbosity);
    format!(
        "{}={level},tower_http={level},sqlx=warn",
        env!("CARGO_CRATE_NAME")
    )
}

/// Initialize JSON logging on stdout
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(verbosity: u8) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_target(true))
        .try_init()
        .context("failed to initialize logging")?;

    Ok(())
}
