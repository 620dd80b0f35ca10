//! Processing seam: turns a [`ProcessingInput`] into a [`ProcessingOutput`].

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{ProcessingInput, ProcessingOutput};

/// Failures a processor is allowed to surface.
///
/// Compile errors and tool failures are not errors; they are reported inside
/// [`ProcessingOutput::compiler_log`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProcessorError {
    /// The requested toolchain is not registered.
    #[error("unknown compiler")]
    UnknownCompiler {
        /// Requested toolchain name.
        name: String,
    },
}

/// Compiles and analyzes source code.
///
/// Implementations are expected to be deterministic for a fixed toolchain
/// version.
#[async_trait]
pub trait Processor: Send + Sync {
    /// Process `input`, returning best-effort output.
    async fn process(&self, input: &ProcessingInput) -> Result<ProcessingOutput, ProcessorError>;
}
