//! Parsing helpers for individual environment values.

use std::net::IpAddr;
use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};
use crate::model::LogFormatChoice;

/// Parse a non-zero TCP port.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] for non-numeric, out-of-range, or zero values.
pub fn parse_port(field: &'static str, value: &str) -> ConfigResult<u16> {
    let port = value
        .trim()
        .parse::<u16>()
        .map_err(|_| ConfigError::invalid(field, value, "out_of_range"))?;
    if port == 0 {
        return Err(ConfigError::invalid(field, value, "zero"));
    }
    Ok(port)
}

/// Parse an IP address.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] when the value is not an address.
pub fn parse_ip(field: &'static str, value: &str) -> ConfigResult<IpAddr> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid(field, value, "not_an_ip_address"))
}

/// Parse a strictly positive count.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] for non-numeric or zero values.
pub fn parse_positive_u32(field: &'static str, value: &str) -> ConfigResult<u32> {
    match value.trim().parse::<u32>() {
        Ok(0) => Err(ConfigError::invalid(field, value, "zero")),
        Ok(count) => Ok(count),
        Err(_) => Err(ConfigError::invalid(field, value, "not_a_number")),
    }
}

/// Parse a strictly positive number of seconds.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] for non-numeric or zero values.
pub fn parse_seconds(field: &'static str, value: &str) -> ConfigResult<Duration> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::invalid(field, value, "zero")),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(_) => Err(ConfigError::invalid(field, value, "not_a_number")),
    }
}

/// Parse a log format name (`json` or `pretty`).
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] for any other value.
pub fn parse_log_format(field: &'static str, value: &str) -> ConfigResult<LogFormatChoice> {
    match value.trim().to_ascii_lowercase().as_str() {
        "json" => Ok(LogFormatChoice::Json),
        "pretty" => Ok(LogFormatChoice::Pretty),
        _ => Err(ConfigError::invalid(field, value, "unknown_log_format")),
    }
}
