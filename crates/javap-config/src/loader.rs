//! Builds [`AppConfig`] from environment variables.

use std::path::PathBuf;

use crate::defaults;
use crate::error::{ConfigError, ConfigResult};
use crate::model::{AppConfig, DatabaseSettings, HttpSettings, LoggingSettings, ProcessorSettings};
use crate::validate::{parse_ip, parse_log_format, parse_port, parse_positive_u32, parse_seconds};

/// Postgres connection string (required).
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
/// Maximum pooled connections.
pub const ENV_DB_MAX_CONNECTIONS: &str = "JAVAP_DB_MAX_CONNECTIONS";
/// Listener interface.
pub const ENV_BIND_ADDR: &str = "JAVAP_BIND_ADDR";
/// Listener port.
pub const ENV_HTTP_PORT: &str = "JAVAP_HTTP_PORT";
/// Default log filter.
pub const ENV_LOG_LEVEL: &str = "JAVAP_LOG_LEVEL";
/// Log encoding (`json` or `pretty`).
pub const ENV_LOG_FORMAT: &str = "JAVAP_LOG_FORMAT";
/// Per-command processing timeout in seconds.
pub const ENV_PROCESS_TIMEOUT_SECS: &str = "JAVAP_PROCESS_TIMEOUT_SECS";
/// Reference Java compiler.
pub const ENV_JAVAC: &str = "JAVAP_JAVAC";
/// Eclipse compiler for Java.
pub const ENV_ECJ: &str = "JAVAP_ECJ";
/// Kotlin compiler.
pub const ENV_KOTLINC: &str = "JAVAP_KOTLINC";
/// Scala compiler.
pub const ENV_SCALAC: &str = "JAVAP_SCALAC";
/// Class file disassembler.
pub const ENV_JAVAP: &str = "JAVAP_JAVAP";
/// JVM launcher used to run the decompiler.
pub const ENV_JAVA: &str = "JAVAP_JAVA";
/// Procyon decompiler jar.
pub const ENV_PROCYON_JAR: &str = "JAVAP_PROCYON_JAR";

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error when `DATABASE_URL` is missing or any value is invalid.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns an error when `DATABASE_URL` is missing or any value is invalid.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let url = get(ENV_DATABASE_URL).ok_or(ConfigError::MissingEnv {
            name: ENV_DATABASE_URL,
        })?;
        let max_connections = get(ENV_DB_MAX_CONNECTIONS)
            .map(|value| parse_positive_u32(ENV_DB_MAX_CONNECTIONS, &value))
            .transpose()?
            .unwrap_or(defaults::DB_MAX_CONNECTIONS);

        let bind_addr = get(ENV_BIND_ADDR)
            .map(|value| parse_ip(ENV_BIND_ADDR, &value))
            .transpose()?
            .unwrap_or(defaults::BIND_ADDR);
        let port = get(ENV_HTTP_PORT)
            .map(|value| parse_port(ENV_HTTP_PORT, &value))
            .transpose()?
            .unwrap_or(defaults::HTTP_PORT);

        let level = get(ENV_LOG_LEVEL).unwrap_or_else(|| defaults::LOG_LEVEL.to_string());
        let format = get(ENV_LOG_FORMAT)
            .map(|value| parse_log_format(ENV_LOG_FORMAT, &value))
            .transpose()?;

        let timeout = match get(ENV_PROCESS_TIMEOUT_SECS) {
            Some(value) => parse_seconds(ENV_PROCESS_TIMEOUT_SECS, &value)?,
            None => std::time::Duration::from_secs(defaults::PROCESS_TIMEOUT_SECS),
        };
        let tool = |name: &str, fallback: &str| get(name).unwrap_or_else(|| fallback.to_string());
        let processor = ProcessorSettings {
            javac: tool(ENV_JAVAC, defaults::JAVAC),
            ecj: tool(ENV_ECJ, defaults::ECJ),
            kotlinc: tool(ENV_KOTLINC, defaults::KOTLINC),
            scalac: tool(ENV_SCALAC, defaults::SCALAC),
            javap: tool(ENV_JAVAP, defaults::JAVAP),
            java: tool(ENV_JAVA, defaults::JAVA),
            procyon_jar: PathBuf::from(tool(ENV_PROCYON_JAR, defaults::PROCYON_JAR)),
            timeout,
        };

        Ok(Self {
            database: DatabaseSettings {
                url,
                max_connections,
            },
            http: HttpSettings { bind_addr, port },
            logging: LoggingSettings { level, format },
            processor,
        })
    }
}
