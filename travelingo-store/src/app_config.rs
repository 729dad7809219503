use serde::Deserialize;
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn default_host() -> IpAddr { IpAddr::V4(Ipv4Addr::UNSPECIFIED) }

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Postgres connection string. Without one, inquiries live in memory.
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_seconds: u64,
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_seconds)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            acquire_timeout_seconds: default_acquire_timeout(),
            run_migrations: true,
        }
    }
}

fn default_max_connections() -> u32 { 5 }
fn default_acquire_timeout() -> u64 { 3 }
fn default_true() -> bool { true }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, e.g. config/production.toml
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // TRAVELINGO__SERVER__PORT=9000 sets server.port
            .add_source(config::Environment::with_prefix("TRAVELINGO").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Build a config from an inline TOML document, skipping files and env.
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_database_section() {
        let config = Config::from_toml("[server]\nport = 8000\n").unwrap();

        assert_eq!(config.server.addr(), "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
        assert!(config.database.url.is_none());
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.database.acquire_timeout(), Duration::from_secs(3));
        assert!(config.database.run_migrations);
    }

    #[test]
    fn test_database_section() {
        let config = Config::from_toml(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [database]
            url = "postgres://localhost/travelingo"
            max_connections = 10
            run_migrations = false
            "#,
        )
        .unwrap();

        assert_eq!(config.server.addr(), "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.database.url.as_deref(), Some("postgres://localhost/travelingo"));
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.acquire_timeout_seconds, 3);
        assert!(!config.database.run_migrations);
    }

    #[test]
    fn test_missing_port_is_an_error() {
        assert!(Config::from_toml("[server]\nhost = \"127.0.0.1\"\n").is_err());
    }
}
