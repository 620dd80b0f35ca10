//! # Design
//!
//! - Centralize application-level errors for bootstrap.
//! - Keep error messages constant while carrying context fields for debugging.
//! - Preserve source errors without re-logging at call sites.

use thiserror::Error;

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("configuration operation failed")]
    Config {
        /// Operation identifier.
        operation: &'static str,
        /// Source configuration error.
        source: javap_config::ConfigError,
    },
    /// Telemetry operations failed.
    #[error("telemetry operation failed")]
    Telemetry {
        /// Operation identifier.
        operation: &'static str,
        /// Source telemetry error.
        source: javap_telemetry::TelemetryError,
    },
    /// Database setup failed.
    #[error("database operation failed")]
    Data {
        /// Operation identifier.
        operation: &'static str,
        /// Source data error.
        source: javap_data::DataError,
    },
    /// Processing the built-in pastes failed.
    #[error("processor operation failed")]
    Processor {
        /// Operation identifier.
        operation: &'static str,
        /// Source processor error.
        source: javap_core::ProcessorError,
    },
    /// API server operations failed.
    #[error("api server operation failed")]
    ApiServer {
        /// Operation identifier.
        operation: &'static str,
        /// Source API server error.
        source: javap_api::ApiServerError,
    },
}

impl AppError {
    pub(crate) const fn config(operation: &'static str, source: javap_config::ConfigError) -> Self {
        Self::Config { operation, source }
    }

    pub(crate) const fn telemetry(
        operation: &'static str,
        source: javap_telemetry::TelemetryError,
    ) -> Self {
        Self::Telemetry { operation, source }
    }

    pub(crate) const fn data(operation: &'static str, source: javap_data::DataError) -> Self {
        Self::Data { operation, source }
    }

    pub(crate) const fn processor(
        operation: &'static str,
        source: javap_core::ProcessorError,
    ) -> Self {
        Self::Processor { operation, source }
    }

    pub(crate) const fn api_server(
        operation: &'static str,
        source: javap_api::ApiServerError,
    ) -> Self {
        Self::ApiServer { operation, source }
    }
}
