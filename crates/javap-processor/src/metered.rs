//! Metrics decorator for any [`Processor`].

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use javap_core::{ProcessingInput, ProcessingOutput, Processor, ProcessorError};
use javap_telemetry::{Metrics, ProcessingOutcome};

/// Label used for runs whose toolchain name was rejected.
const UNKNOWN_COMPILER_LABEL: &str = "unknown";

/// Records run counts and latency for the wrapped processor.
#[derive(Clone)]
pub struct MeteredProcessor {
    inner: Arc<dyn Processor>,
    metrics: Metrics,
}

impl MeteredProcessor {
    /// Wrap `inner`, reporting into `metrics`.
    #[must_use]
    pub const fn new(inner: Arc<dyn Processor>, metrics: Metrics) -> Self {
        Self { inner, metrics }
    }
}

#[async_trait]
impl Processor for MeteredProcessor {
    async fn process(&self, input: &ProcessingInput) -> Result<ProcessingOutput, ProcessorError> {
        let started = Instant::now();
        let result = self.inner.process(input).await;
        let (compiler, outcome) = match &result {
            Ok(_) => (input.compiler_name.as_str(), ProcessingOutcome::Success),
            Err(_) => (UNKNOWN_COMPILER_LABEL, ProcessingOutcome::Rejected),
        };
        self.metrics
            .observe_processing(compiler, outcome, started.elapsed());
        result
    }
}

#[cfg(test)]
mod tests {
    use javap_test_support::mocks::EchoProcessor;

    use super::*;

    #[tokio::test]
    async fn successful_runs_are_counted_per_compiler() -> anyhow::Result<()> {
        let metrics = Metrics::new()?;
        let processor = MeteredProcessor::new(Arc::new(EchoProcessor::new()), metrics.clone());

        let input = ProcessingInput::new("class A {}", "ECJ");
        let output = processor.process(&input).await?;
        assert_eq!(output, EchoProcessor::expected(&input));

        let rendered = metrics.render()?;
        assert!(rendered.contains("processing_total{compiler=\"ECJ\",outcome=\"success\"} 1"));
        Ok(())
    }

    #[tokio::test]
    async fn rejected_names_do_not_become_labels() -> anyhow::Result<()> {
        let metrics = Metrics::new()?;
        let processor = MeteredProcessor::new(Arc::new(EchoProcessor::new()), metrics.clone());

        let err = processor
            .process(&ProcessingInput::new("x", "COBOL"))
            .await
            .err();
        assert_eq!(
            err,
            Some(ProcessorError::UnknownCompiler {
                name: "COBOL".to_string()
            })
        );

        let rendered = metrics.render()?;
        assert!(rendered.contains("processing_total{compiler=\"unknown\",outcome=\"rejected\"} 1"));
        assert!(!rendered.contains("COBOL"));
        Ok(())
    }
}
