#![forbid(unsafe_code)]
#![deny(
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Telemetry primitives shared across the javap workspace.
//!
//! This crate centralises logging, metrics, and request-id helpers so the
//! service surfaces share one observability story.

pub mod error;
pub mod init;
pub mod layers;
pub mod metrics;

pub use error::{Result, TelemetryError};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
pub use layers::{propagate_request_id_layer, set_request_id_layer};
pub use metrics::{Metrics, MetricsSnapshot, ProcessingOutcome};
