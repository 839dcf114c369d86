use crate::{config::Config, routes};
use anyhow::{Context, Result};
use axum::{Router, routing::get};
use std::{net::IpAddr, sync::Arc};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Build the router with all endpoints
#[must_use]
pub fn router(config: Arc<Config>) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/db-test", get(routes::db_test))
        .route("/db-query", get(routes::db_query))
        .route("/info", get(routes::info))
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(config)
}

/// Bind to the explicit address, or to `[::]` falling back to `0.0.0.0`
///
/// # Errors
///
/// Returns an error if the port cannot be bound
pub async fn bind(listen: Option<IpAddr>, port: u16) -> Result<TcpListener> {
    let listener = match listen {
        Some(addr) => TcpListener::bind((addr, port))
            .await
            .with_context(|| format!("failed to bind {addr} port {port}"))?,
        None => {
            if let Ok(l) = TcpListener::bind(format!("[::]:{port}")).await {
                l
            } else {
                TcpListener::bind(format!("0.0.0.0:{port}"))
                    .await
                    .with_context(|| format!("failed to bind port {port}"))?
            }
        }
    };

    Ok(listener)
}

/// Start the HTTP service
///
/// # Errors
///
/// Returns an error if the service fails to bind or to serve
pub async fn start(mut config: Config) -> Result<()> {
    let listener = bind(config.listen, config.server_port).await?;
    let local_addr = listener.local_addr()?;

    // report the port actually bound, relevant when 0 was requested
    config.server_port = local_addr.port();

    info!(
        listen = %local_addr,
        database_type = %config.database_type,
        engine = config.engine.name(),
        host = %config.host,
        "starting {}",
        routes::APPLICATION
    );

    serve(listener, config).await
}

/// Serve on an already bound listener until SIGINT or SIGTERM
///
/// # Errors
///
/// Returns an error if the server fails
pub async fn serve(listener: TcpListener, config: Config) -> Result<()> {
    axum::serve(listener, router(Arc::new(config)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}
