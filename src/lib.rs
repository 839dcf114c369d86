//! Liveness and database connectivity diagnostics over HTTP.
//!
//! Serves `/`, `/health`, `/db-test`, `/db-query` and `/info` as JSON for
//! load balancer and orchestrator probes in front of a MySQL or PostgreSQL
//! database.

pub mod cli;
pub mod config;
pub mod error;
pub mod queries;
pub mod routes;
pub mod server;
pub mod telemetry;
