use crate::{
    error::DbError,
    queries::{mysql, postgres},
};
use std::{fmt, net::IpAddr, str::FromStr};

pub const DEFAULT_DATABASE_TYPE: &str = "rds";
pub const DEFAULT_ENGINE: &str = "mysql";
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: &str = "3306";
pub const DEFAULT_DATABASE: &str = "testdb";
pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "password";
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Deployment type meaning "no database behind this service"
pub const DATABASE_TYPE_NONE: &str = "none";

/// Supported relational database engines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    MySql,
    Postgres,
}

impl FromStr for Engine {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mysql" => Ok(Self::MySql),
            "postgres" => Ok(Self::Postgres),
            other => Err(DbError::UnsupportedEngine(other.to_string())),
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Engine {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Postgres => "postgres",
        }
    }

    /// URI scheme understood by the driver
    #[must_use]
    pub const fn scheme(self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Postgres => "postgresql",
        }
    }

    #[must_use]
    pub const fn version_query(self) -> &'static str {
        match self {
            Self::MySql => mysql::VERSION_QUERY,
            Self::Postgres => postgres::VERSION_QUERY,
        }
    }

    #[must_use]
    pub const fn create_table_statement(self) -> &'static str {
        match self {
            Self::MySql => mysql::CREATE_TABLE,
            Self::Postgres => postgres::CREATE_TABLE,
        }
    }
}

/// Engine name as configured, resolved once into an [`Engine`].
///
/// An unknown name is kept rather than rejected so the service still starts
/// and reports the problem per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSetting {
    name: String,
    engine: Option<Engine>,
}

impl From<&str> for EngineSetting {
    fn from(name: &str) -> Self {
        Self {
            name: name.to_string(),
            engine: name.parse().ok(),
        }
    }
}

impl EngineSetting {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// # Errors
    ///
    /// Returns `DbError::UnsupportedEngine` if the configured name is neither
    /// `mysql` nor `postgres`
    pub fn resolve(&self) -> Result<Engine, DbError> {
        self.engine
            .ok_or_else(|| DbError::UnsupportedEngine(self.name.clone()))
    }
}

/// Process-wide settings, resolved once at startup and never mutated after
/// the listener is bound.
#[derive(Clone)]
pub struct Config {
    pub database_type: String,
    pub engine: EngineSetting,
    pub host: String,
    pub port: String,
    pub database: String,
    pub username: String,
    pub password: String,
    pub listen: Option<IpAddr>,
    pub server_port: u16,
    pub region: Option<String>,
    /// Keep only the newest N rows in the diagnostic table
    pub retain: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_type: DEFAULT_DATABASE_TYPE.to_string(),
            engine: EngineSetting::from(DEFAULT_ENGINE),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_DB_PORT.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            listen: None,
            server_port: DEFAULT_SERVER_PORT,
            region: None,
            retain: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_type", &self.database_type)
            .field("engine", &self.engine.name())
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"********")
            .field("listen", &self.listen)
            .field("server_port", &self.server_port)
            .field("region", &self.region)
            .field("retain", &self.retain)
            .finish()
    }
}

impl Config {
    /// False when the deployment has no database or no host to reach
    #[must_use]
    pub fn is_database_configured(&self) -> bool {
        self.database_type != DATABASE_TYPE_NONE && !self.host.is_empty()
    }

    /// `host:port`, or the host verbatim when it already carries a port
    #[must_use]
    pub fn host_port(&self) -> String {
        if self.host.contains(':') {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Build the engine specific connection URI
    ///
    /// # Errors
    ///
    /// Returns `DbError::UnsupportedEngine` if the engine is not supported
    pub fn connection_url(&self) -> Result<String, DbError> {
        let engine = self.engine.resolve()?;
        Ok(format!(
            "{}://{}:{}@{}/{}",
            engine.scheme(),
            self.username,
            self.password,
            self.host_port(),
            self.database
        ))
    }
}
