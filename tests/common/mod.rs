#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use dbprobe::{
    config::{Config, EngineSetting},
    server,
};
use serde_json::Value;
use std::env;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
};

pub const MYSQL_HOST: &str = "localhost:3306";
pub const POSTGRES_HOST: &str = "localhost:5432";

pub fn skip_if_no_postgres() -> bool {
    env::var("SKIP_POSTGRES_TESTS").is_ok()
}

pub fn skip_if_no_mariadb() -> bool {
    env::var("SKIP_MARIADB_TESTS").is_ok()
}

pub fn mysql_config() -> Config {
    Config {
        engine: EngineSetting::from("mysql"),
        host: MYSQL_HOST.to_string(),
        database: "testdb".to_string(),
        username: "dbprobe".to_string(),
        password: "secret".to_string(),
        ..Config::default()
    }
}

pub fn postgres_config() -> Config {
    Config {
        engine: EngineSetting::from("postgres"),
        host: POSTGRES_HOST.to_string(),
        port: "5432".to_string(),
        database: "testdb".to_string(),
        username: "postgres".to_string(),
        password: "secret".to_string(),
        ..Config::default()
    }
}

/// Config pointing at a local port with nothing listening
pub fn unreachable_config(engine: &str) -> Config {
    Config {
        engine: EngineSetting::from(engine),
        host: "127.0.0.1".to_string(),
        port: pick_free_port().to_string(),
        ..Config::default()
    }
}

/// Config pointing at a local listener that accepts connections and never
/// answers, so the driver handshake stalls until the connect timeout
pub async fn stalled_config(engine: &str) -> Config {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
        .await
        .expect("failed to bind stalled listener");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    Config {
        engine: EngineSetting::from(engine),
        host: "127.0.0.1".to_string(),
        port: port.to_string(),
        ..Config::default()
    }
}

pub fn pick_free_port() -> u16 {
    std::net::TcpListener::bind(("127.0.0.1", 0))
        .expect("failed to bind random local port")
        .local_addr()
        .expect("failed to read local addr")
        .port()
}

/// Serve `config` on an ephemeral loopback port and return that port
pub async fn spawn_server(mut config: Config) -> u16 {
    let listener = server::bind(Some("127.0.0.1".parse().unwrap()), 0)
        .await
        .expect("failed to bind test server");
    let port = listener.local_addr().unwrap().port();
    config.server_port = port;

    tokio::spawn(async move { server::serve(listener, config).await });

    port
}

/// Minimal HTTP/1.1 GET returning the status code and JSON body
pub async fn fetch(port: u16, path: &str) -> Option<(u16, Value)> {
    let mut stream = TcpStream::connect(("127.0.0.1", port)).await.ok()?;
    let request =
        format!("GET {path} HTTP/1.1\r\nHost: 127.0.0.1:{port}\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.ok()?;

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.ok()?;
    let response = String::from_utf8(response).ok()?;

    let (head, body) = response.split_once("\r\n\r\n")?;
    let status = head.split_whitespace().nth(1)?.parse::<u16>().ok()?;
    let json = serde_json::from_str(body).ok()?;

    Some((status, json))
}
