//! Gateway configuration.

use clap::Parser;
use thiserror::Error;

/// Default host to bind to.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default store URL.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://jokes.db";

/// Default mount point of the joke routes.
pub const DEFAULT_BASE_PATH: &str = "/api";

/// Default SQL pool size.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Jokebox HTTP/JSON gateway command line arguments.
#[derive(Debug, Parser)]
#[command(name = "jokebox-gateway")]
#[command(version, about = "HTTP/JSON API for Jokebox")]
pub struct Args {
    /// Address to bind to.
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Store URL (memory, sqlite::memory:, sqlite://<path>, postgres://...).
    #[arg(short, long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Path prefix for the joke routes ("/" mounts them at the root).
    #[arg(long, default_value = DEFAULT_BASE_PATH)]
    pub base_path: String,

    /// Maximum number of pooled store connections (PostgreSQL only; SQLite
    /// and memory stores use a single connection).
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Log level used when RUST_LOG is unset (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("base path must start with '/': {0}")]
    InvalidBasePath(String),

    #[error("max connections must be at least 1")]
    NoConnections,
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Store URL.
    pub database_url: String,
    /// Path prefix for the joke routes.
    pub base_path: String,
    /// Maximum number of pooled store connections.
    pub max_connections: u32,
}

impl GatewayConfig {
    /// Set the bind address.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the store URL.
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = url.into();
        self
    }

    /// Set the route prefix.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Set the pool size.
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// `host:port` to bind the listener to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Route prefix without a trailing slash. Empty means the root.
    pub fn mount_path(&self) -> &str {
        self.base_path.trim_end_matches('/')
    }

    /// Reject configurations the gateway cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_path.is_empty() && !self.base_path.starts_with('/') {
            return Err(ConfigError::InvalidBasePath(self.base_path.clone()));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::NoConnections);
        }
        Ok(())
    }
}

impl From<Args> for GatewayConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            database_url: args.database_url,
            base_path: args.base_path,
            max_connections: args.max_connections,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}
