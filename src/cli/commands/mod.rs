use crate::config::{
    DEFAULT_DATABASE, DEFAULT_DATABASE_TYPE, DEFAULT_DB_PORT, DEFAULT_ENGINE, DEFAULT_HOST,
    DEFAULT_PASSWORD, DEFAULT_USERNAME,
};
use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

/// Pure clap command definitions with zero business logic
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new(env!("CARGO_PKG_NAME"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("database-type")
                .default_value(DEFAULT_DATABASE_TYPE)
                .env("DATABASE_TYPE")
                .help("Deployment type, 'none' disables all database checks")
                .long("database-type")
                .short('t'),
        )
        .arg(
            Arg::new("engine")
                .default_value(DEFAULT_ENGINE)
                .env("DATABASE_ENGINE")
                .help("Database engine: mysql or postgres")
                .long("engine")
                .short('e'),
        )
        .arg(
            Arg::new("host")
                .default_value(DEFAULT_HOST)
                .env("DATABASE_HOST")
                .help("Database host, optionally with :port")
                .long("host")
                .short('H'),
        )
        .arg(
            Arg::new("db-port")
                .default_value(DEFAULT_DB_PORT)
                .env("DATABASE_PORT")
                .help("Database port, ignored when the host already has one")
                .long("db-port"),
        )
        .arg(
            Arg::new("database")
                .default_value(DEFAULT_DATABASE)
                .env("DATABASE_NAME")
                .help("Database name")
                .long("database")
                .short('d'),
        )
        .arg(
            Arg::new("username")
                .default_value(DEFAULT_USERNAME)
                .env("DATABASE_USERNAME")
                .help("Database user")
                .long("username")
                .short('u'),
        )
        .arg(
            Arg::new("password")
                .default_value(DEFAULT_PASSWORD)
                .env("DATABASE_PASSWORD")
                .help("Database password")
                .hide_env_values(true)
                .hide_default_value(true)
                .long("password"),
        )
        .arg(
            Arg::new("port")
                .default_value("8080")
                .env("SERVER_PORT")
                .help("HTTP listening port")
                .long("port")
                .short('p')
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("listen")
                .env("SERVER_LISTEN")
                .help("IP address to bind to (default: [::]:port, accepts both IPv6 and IPv4)")
                .long("listen")
                .long_help(
                    "IP address to bind to:\n\
                    Not specified (default) binds to [::]:port which accepts both IPv6 and IPv4 connections.\n\
                    Falls back to 0.0.0.0:port if IPv6 is unavailable.\n\n\
                    Specific IPv4 examples: '0.0.0.0', '127.0.0.1'\n\
                    Specific IPv6: '::', '::1'"
                )
                .short('l')
                .value_name("IP"),
        )
        .arg(
            Arg::new("region")
                .env("AWS_REGION")
                .help("Region label reported by /info and /db-test")
                .long("region"),
        )
        .arg(
            Arg::new("retain")
                .env("HEALTH_CHECK_RETAIN")
                .help("Keep only the newest N rows in the health_check table (default: keep all)")
                .long("retain")
                .value_name("N")
                .value_parser(clap::value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new("verbose")
                .help("Increase log verbosity, -v debug, -vv trace (RUST_LOG overrides)")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count),
        )
}
