//! Deterministic processor doubles.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use javap_core::{ProcessingInput, ProcessingOutput, Processor, ProcessorError, SdkRegistry};

/// Processor that echoes the code back instead of invoking a toolchain.
///
/// Output is `compiler log <code>`, `javap <code>`, `procyon <code>`. Unknown
/// toolchain names are rejected like a real processor would.
#[derive(Debug)]
pub struct EchoProcessor {
    sdks: SdkRegistry,
    calls: AtomicUsize,
}

impl EchoProcessor {
    /// Echo processor accepting the standard toolchains.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sdks: SdkRegistry::standard(),
            calls: AtomicUsize::new(0),
        }
    }

    /// The output this double produces for `input`.
    #[must_use]
    pub fn expected(input: &ProcessingInput) -> ProcessingOutput {
        ProcessingOutput::new(
            format!("compiler log {}", input.code),
            format!("javap {}", input.code),
            format!("procyon {}", input.code),
        )
    }

    /// Number of `process` calls observed so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for EchoProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Processor for EchoProcessor {
    async fn process(&self, input: &ProcessingInput) -> Result<ProcessingOutput, ProcessorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.sdks.by_name(&input.compiler_name).is_none() {
            return Err(ProcessorError::UnknownCompiler {
                name: input.compiler_name.clone(),
            });
        }
        Ok(Self::expected(input))
    }
}
