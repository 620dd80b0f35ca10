//! Typed settings consumed by the javap crates.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Complete service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Persistence settings.
    pub database: DatabaseSettings,
    /// HTTP listener settings.
    pub http: HttpSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
    /// External toolchain settings.
    pub processor: ProcessorSettings,
}

/// Postgres connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    /// Connection string; may carry credentials.
    pub url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
}

impl std::fmt::Debug for DatabaseSettings {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("DatabaseSettings")
            .field("url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpSettings {
    /// Interface to bind.
    pub bind_addr: IpAddr,
    /// Non-zero TCP port.
    pub port: u16,
}

impl HttpSettings {
    /// Socket address the API listens on.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

/// Log output encoding requested by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormatChoice {
    /// Structured JSON lines.
    Json,
    /// Human-readable output.
    Pretty,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Output encoding; `None` lets the build profile decide.
    pub format: Option<LogFormatChoice>,
}

/// Locations of the external tools and the per-command time limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorSettings {
    /// `javac` executable.
    pub javac: String,
    /// Eclipse compiler executable.
    pub ecj: String,
    /// `kotlinc` executable.
    pub kotlinc: String,
    /// `scalac` executable.
    pub scalac: String,
    /// `javap` executable.
    pub javap: String,
    /// `java` executable used to run the decompiler.
    pub java: String,
    /// Procyon decompiler jar.
    pub procyon_jar: PathBuf,
    /// Wall-clock limit for each external command.
    pub timeout: Duration,
}
