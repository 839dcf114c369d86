use crate::{
    cli::actions::Action,
    config::{
        Config, DEFAULT_DATABASE, DEFAULT_DATABASE_TYPE, DEFAULT_DB_PORT, DEFAULT_ENGINE,
        DEFAULT_HOST, DEFAULT_PASSWORD, DEFAULT_SERVER_PORT, DEFAULT_USERNAME, EngineSetting,
    },
};
use anyhow::{Context, Result};
use clap::ArgMatches;
use std::net::IpAddr;

fn string_or(matches: &ArgMatches, id: &str, default: &str) -> String {
    matches
        .get_one::<String>(id)
        .map_or_else(|| default.to_string(), Clone::clone)
}

/// Extract the `-v` count
#[must_use]
pub fn extract_verbosity(matches: &ArgMatches) -> u8 {
    matches.get_count("verbose")
}

/// Convert `ArgMatches` into typed Action enum with validation
///
/// # Errors
///
/// Returns an error if the listen address is not a valid IP address
pub fn dispatch(matches: &ArgMatches) -> Result<Action> {
    let listen = matches
        .get_one::<String>("listen")
        .map(|addr| {
            addr.parse::<IpAddr>()
                .with_context(|| format!("Invalid IP address: {addr}"))
        })
        .transpose()?;

    let config = Config {
        database_type: string_or(matches, "database-type", DEFAULT_DATABASE_TYPE),
        engine: EngineSetting::from(string_or(matches, "engine", DEFAULT_ENGINE).as_str()),
        host: string_or(matches, "host", DEFAULT_HOST),
        port: string_or(matches, "db-port", DEFAULT_DB_PORT),
        database: string_or(matches, "database", DEFAULT_DATABASE),
        username: string_or(matches, "username", DEFAULT_USERNAME),
        password: string_or(matches, "password", DEFAULT_PASSWORD),
        listen,
        server_port: matches
            .get_one::<u16>("port")
            .copied()
            .unwrap_or(DEFAULT_SERVER_PORT),
        region: matches.get_one::<String>("region").cloned(),
        retain: matches.get_one::<u32>("retain").copied(),
    };

    Ok(Action::Serve { config })
}
