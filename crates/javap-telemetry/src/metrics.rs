//! Prometheus-backed metrics registry and snapshot helpers.
//!
//! # Design
//! - Encapsulates collector registration to keep the public API small.
//! - Exposes the counters and gauges relevant to paste processing.

use std::sync::Arc;
use std::time::Duration;

use prometheus::core::Collector;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use serde::Serialize;

use crate::error::{Result, TelemetryError};

/// Outcome label recorded for a processing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingOutcome {
    /// The processor produced an output.
    Success,
    /// The processor rejected the input.
    Rejected,
}

impl ProcessingOutcome {
    const fn as_label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Rejected => "rejected",
        }
    }
}

/// Prometheus-backed metrics registry shared across services.
#[derive(Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    registry: Registry,
    http_requests_total: IntCounterVec,
    pastes_created_total: IntCounter,
    pastes_updated_total: IntCounter,
    processing_total: IntCounterVec,
    processing_latency_ms: IntGauge,
}

/// Snapshot of selected counters and gauges for health reporting.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    /// Pastes created since start-up.
    pub pastes_created_total: u64,
    /// Pastes updated since start-up.
    pub pastes_updated_total: u64,
    /// Latest processing latency in milliseconds.
    pub processing_latency_ms: i64,
}

impl Metrics {
    /// Construct a new metrics registry with the standard collectors registered.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the Prometheus collectors cannot be
    /// built or registered.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let http_requests_total = register(
            &registry,
            "http_requests_total",
            IntCounterVec::new(
                Opts::new("http_requests_total", "Total HTTP requests received"),
                &["route", "code"],
            ),
        )?;
        let pastes_created_total = register(
            &registry,
            "pastes_created_total",
            IntCounter::with_opts(Opts::new("pastes_created_total", "Pastes created")),
        )?;
        let pastes_updated_total = register(
            &registry,
            "pastes_updated_total",
            IntCounter::with_opts(Opts::new("pastes_updated_total", "Pastes updated")),
        )?;
        let processing_total = register(
            &registry,
            "processing_total",
            IntCounterVec::new(
                Opts::new(
                    "processing_total",
                    "Processing runs by compiler and outcome",
                ),
                &["compiler", "outcome"],
            ),
        )?;
        let processing_latency_ms = register(
            &registry,
            "processing_latency_ms",
            IntGauge::with_opts(Opts::new(
                "processing_latency_ms",
                "Duration of the latest processing run (ms)",
            )),
        )?;

        Ok(Self {
            inner: Arc::new(MetricsInner {
                registry,
                http_requests_total,
                pastes_created_total,
                pastes_updated_total,
                processing_total,
                processing_latency_ms,
            }),
        })
    }

    /// Increment the HTTP request counter for a route/status pair.
    pub fn inc_http_request(&self, route: &str, code: u16) {
        self.inner
            .http_requests_total
            .with_label_values(&[route, &code.to_string()])
            .inc();
    }

    /// Record a newly created paste.
    pub fn inc_paste_created(&self) {
        self.inner.pastes_created_total.inc();
    }

    /// Record an updated paste.
    pub fn inc_paste_updated(&self) {
        self.inner.pastes_updated_total.inc();
    }

    /// Record a processing run and its wall-clock duration.
    pub fn observe_processing(
        &self,
        compiler: &str,
        outcome: ProcessingOutcome,
        elapsed: Duration,
    ) {
        self.inner
            .processing_total
            .with_label_values(&[compiler, outcome.as_label()])
            .inc();
        self.inner
            .processing_latency_ms
            .set(duration_to_ms(elapsed));
    }

    /// Render the registry in Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or produces invalid UTF-8.
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|source| TelemetryError::MetricsEncode { source })?;
        String::from_utf8(buffer).map_err(|source| TelemetryError::MetricsUtf8 { source })
    }

    /// Capture a point-in-time snapshot of the paste counters.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            pastes_created_total: self.inner.pastes_created_total.get(),
            pastes_updated_total: self.inner.pastes_updated_total.get(),
            processing_latency_ms: self.inner.processing_latency_ms.get(),
        }
    }
}

fn register<C>(
    registry: &Registry,
    name: &'static str,
    collector: prometheus::Result<C>,
) -> Result<C>
where
    C: Collector + Clone + 'static,
{
    let collector = collector.map_err(|source| TelemetryError::MetricsRegister { name, source })?;
    registry
        .register(Box::new(collector.clone()))
        .map_err(|source| TelemetryError::MetricsRegister { name, source })?;
    Ok(collector)
}

fn duration_to_ms(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}
