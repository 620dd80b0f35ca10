//! Built-in, read-only pastes: one per registered toolchain.
//!
//! # Design
//! - Built once during startup by running the processor over each language sample.
//! - Never persisted and never mutated after construction; share it through `Arc`.
//! - The owner token fails validation, so no caller can ever edit a default paste.

use std::collections::HashMap;

use tracing::info;

use crate::model::{Paste, ProcessingInput};
use crate::processor::{Processor, ProcessorError};
use crate::sdk::SdkRegistry;

/// Reserved id prefix for built-in pastes.
pub const DEFAULT_ID_PREFIX: &str = "default:";

/// Owner token of built-in pastes. Never a valid caller token.
pub(crate) const DEFAULT_OWNER_TOKEN: &str = "#default";

/// Immutable cache of the built-in pastes keyed by `default:<NAME>`.
#[derive(Debug, Clone)]
pub struct DefaultPasteRegistry {
    pastes: Vec<Paste>,
    index: HashMap<String, usize>,
}

impl DefaultPasteRegistry {
    /// Process the sample program of every toolchain in `sdks`.
    ///
    /// # Errors
    ///
    /// Returns the first processor failure; callers treat it as fatal.
    pub async fn build(
        sdks: &SdkRegistry,
        processor: &dyn Processor,
    ) -> Result<Self, ProcessorError> {
        let mut pastes = Vec::with_capacity(sdks.all().len());
        for sdk in sdks.all() {
            let input = ProcessingInput::new(sdk.language.sample_code(), sdk.name);
            let output = processor.process(&input).await?;
            pastes.push(Paste {
                id: default_paste_id(sdk.name),
                owner_token: DEFAULT_OWNER_TOKEN.to_string(),
                input,
                output,
            });
            info!(compiler = sdk.name, "default paste ready");
        }
        Ok(Self::from_pastes(pastes))
    }

    fn from_pastes(pastes: Vec<Paste>) -> Self {
        let index = pastes
            .iter()
            .enumerate()
            .map(|(position, paste)| (paste.id.clone(), position))
            .collect();
        Self { pastes, index }
    }

    /// Look up a built-in paste by its full id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Paste> {
        self.index.get(id).map(|position| &self.pastes[*position])
    }

    /// All built-in pastes in toolchain registration order.
    #[must_use]
    pub fn pastes(&self) -> &[Paste] {
        &self.pastes
    }
}

/// Id of the built-in paste for `toolchain`.
#[must_use]
pub fn default_paste_id(toolchain: &str) -> String {
    format!("{DEFAULT_ID_PREFIX}{toolchain}")
}

/// Whether `id` lies in the reserved built-in namespace.
#[must_use]
pub fn is_default_id(id: &str) -> bool {
    id.starts_with(DEFAULT_ID_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProcessingOutput;
    use crate::token::is_valid_owner_token;
    use async_trait::async_trait;

    struct EchoProcessor;

    #[async_trait]
    impl Processor for EchoProcessor {
        async fn process(
            &self,
            input: &ProcessingInput,
        ) -> Result<ProcessingOutput, ProcessorError> {
            Ok(ProcessingOutput::new(
                format!("log {}", input.compiler_name),
                "javap",
                "procyon",
            ))
        }
    }

    struct RejectingProcessor;

    #[async_trait]
    impl Processor for RejectingProcessor {
        async fn process(
            &self,
            input: &ProcessingInput,
        ) -> Result<ProcessingOutput, ProcessorError> {
            Err(ProcessorError::UnknownCompiler {
                name: input.compiler_name.clone(),
            })
        }
    }

    #[tokio::test]
    async fn builds_one_paste_per_toolchain() -> anyhow::Result<()> {
        let sdks = SdkRegistry::standard();
        let registry = DefaultPasteRegistry::build(&sdks, &EchoProcessor).await?;

        assert_eq!(registry.pastes().len(), sdks.all().len());
        let java = registry
            .get("default:JAVA")
            .ok_or_else(|| anyhow::anyhow!("missing default java paste"))?;
        assert_eq!(java.input.compiler_name, "JAVA");
        assert_eq!(java.output.compiler_log, "log JAVA");
        assert_eq!(registry.pastes()[0], *java);
        assert!(!is_valid_owner_token(&java.owner_token));
        assert!(registry.get("default:COBOL").is_none());
        assert!(registry.get("JAVA").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn processor_failure_aborts_build() {
        let result =
            DefaultPasteRegistry::build(&SdkRegistry::standard(), &RejectingProcessor).await;
        assert!(matches!(
            result,
            Err(ProcessorError::UnknownCompiler { name }) if name == "JAVA"
        ));
    }

    #[test]
    fn default_namespace_helpers() {
        assert_eq!(default_paste_id("KOTLIN"), "default:KOTLIN");
        assert!(is_default_id("default:KOTLIN"));
        assert!(!is_default_id("abcdef"));
    }
}
