//! Paste service: validation, authorization, processing, and persistence.
//!
//! # Design
//! - Checks run in a fixed order: token shape, existence, ownership, toolchain.
//! - Cheap validation always precedes processing.
//! - Nothing is written unless every check and the processor succeeded.
//! - Concurrent updates of one paste are not coordinated; the last write wins.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::defaults::{DefaultPasteRegistry, is_default_id};
use crate::error::{PasteError, PasteResult};
use crate::model::{Paste, PasteView, ProcessingInput, ProcessingOutput};
use crate::processor::{Processor, ProcessorError};
use crate::store::{PasteStore, StoreError};
use crate::token::{generate_paste_id, validate_owner_token};

const MAX_ID_ATTEMPTS: usize = 5;

/// Entry point for creating, reading, and updating pastes.
#[derive(Clone)]
pub struct PasteService {
    store: Arc<dyn PasteStore>,
    processor: Arc<dyn Processor>,
    defaults: Arc<DefaultPasteRegistry>,
}

impl PasteService {
    /// Wire the service to its collaborators.
    #[must_use]
    pub fn new(
        store: Arc<dyn PasteStore>,
        processor: Arc<dyn Processor>,
        defaults: Arc<DefaultPasteRegistry>,
    ) -> Self {
        Self {
            store,
            processor,
            defaults,
        }
    }

    /// Built-in pastes served by this instance.
    #[must_use]
    pub fn defaults(&self) -> &DefaultPasteRegistry {
        &self.defaults
    }

    /// Process `input` and store it as a new paste owned by `owner_token`.
    ///
    /// # Errors
    ///
    /// - [`PasteError::InvalidOwnerToken`] when the token is absent or malformed.
    /// - [`PasteError::UnknownCompilerTarget`] when the toolchain is not registered.
    /// - [`PasteError::Store`] when persistence fails.
    pub async fn create(
        &self,
        owner_token: Option<&str>,
        input: ProcessingInput,
    ) -> PasteResult<PasteView> {
        let owner_token = validate_owner_token(owner_token)?;
        let output = self.run_processor(&input).await?;

        let mut paste = Paste {
            id: generate_paste_id(),
            owner_token: owner_token.to_string(),
            input,
            output,
        };
        let mut attempt = 1;
        loop {
            match self.store.insert(&paste).await {
                Ok(()) => break,
                Err(StoreError::DuplicateId { id }) if attempt < MAX_ID_ATTEMPTS => {
                    warn!(paste_id = %id, attempt, "generated paste id already taken");
                    paste.id = generate_paste_id();
                    attempt += 1;
                }
                Err(err) => return Err(PasteError::store("paste.insert", err)),
            }
        }

        info!(paste_id = %paste.id, compiler = %paste.input.compiler_name, "paste created");
        Ok(PasteView {
            paste,
            editable: true,
        })
    }

    /// Fetch a paste, reporting whether `caller_token` may edit it.
    ///
    /// # Errors
    ///
    /// - [`PasteError::PasteNotFound`] when no paste has the id.
    /// - [`PasteError::Store`] when the lookup fails.
    pub async fn get(&self, caller_token: Option<&str>, id: &str) -> PasteResult<PasteView> {
        if is_default_id(id) {
            return self
                .defaults
                .get(id)
                .cloned()
                .map(PasteView::read_only)
                .ok_or_else(|| not_found(id));
        }

        let paste = self.load(id).await?;
        Ok(PasteView::for_caller(paste, caller_token))
    }

    /// Replace the input of a paste owned by `owner_token`.
    ///
    /// Without `input` the call changes nothing and returns the current paste.
    ///
    /// # Errors
    ///
    /// - [`PasteError::InvalidOwnerToken`] when the token is absent or malformed.
    /// - [`PasteError::PasteNotFound`] when no paste has the id.
    /// - [`PasteError::OwnershipMismatch`] when the token does not own the paste.
    /// - [`PasteError::UnknownCompilerTarget`] when the toolchain is not registered.
    /// - [`PasteError::Store`] when persistence fails.
    pub async fn update(
        &self,
        owner_token: Option<&str>,
        id: &str,
        input: Option<ProcessingInput>,
    ) -> PasteResult<PasteView> {
        let owner_token = validate_owner_token(owner_token)?;

        if is_default_id(id) {
            return Err(if self.defaults.get(id).is_some() {
                PasteError::OwnershipMismatch { id: id.to_string() }
            } else {
                not_found(id)
            });
        }

        let existing = self.load(id).await?;
        if !existing.is_owned_by(Some(owner_token)) {
            warn!(paste_id = %id, "update rejected for foreign token");
            return Err(PasteError::OwnershipMismatch { id: id.to_string() });
        }

        let Some(input) = input else {
            debug!(paste_id = %id, "update without input; returning current paste");
            return Ok(PasteView {
                paste: existing,
                editable: true,
            });
        };

        let output = self.run_processor(&input).await?;
        let updated = existing.with_contents(input, output);
        self.store
            .update(&updated)
            .await
            .map_err(|err| match err {
                StoreError::Missing { id } => PasteError::PasteNotFound { id },
                other => PasteError::store("paste.update", other),
            })?;

        info!(paste_id = %id, compiler = %updated.input.compiler_name, "paste updated");
        Ok(PasteView {
            paste: updated,
            editable: true,
        })
    }

    async fn load(&self, id: &str) -> PasteResult<Paste> {
        self.store
            .find_by_id(id)
            .await
            .map_err(|err| PasteError::store("paste.find_by_id", err))?
            .ok_or_else(|| not_found(id))
    }

    async fn run_processor(&self, input: &ProcessingInput) -> PasteResult<ProcessingOutput> {
        let started = Instant::now();
        let result = self.processor.process(input).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        match result {
            Ok(output) => {
                debug!(compiler = %input.compiler_name, elapsed_ms, "processing finished");
                Ok(output)
            }
            Err(ProcessorError::UnknownCompiler { name }) => {
                debug!(compiler = %name, "processor rejected toolchain");
                Err(PasteError::UnknownCompilerTarget { name })
            }
        }
    }
}

fn not_found(id: &str) -> PasteError {
    PasteError::PasteNotFound { id: id.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::SdkRegistry;
    use crate::store::MemoryPasteStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct EchoProcessor {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Processor for EchoProcessor {
        async fn process(
            &self,
            input: &ProcessingInput,
        ) -> Result<ProcessingOutput, ProcessorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if SdkRegistry::standard()
                .by_name(&input.compiler_name)
                .is_none()
            {
                return Err(ProcessorError::UnknownCompiler {
                    name: input.compiler_name.clone(),
                });
            }
            Ok(expected_output(input))
        }
    }

    fn expected_output(input: &ProcessingInput) -> ProcessingOutput {
        ProcessingOutput::new(
            format!("compiler log {}", input.code),
            format!("javap {}", input.code),
            format!("procyon {}", input.code),
        )
    }

    struct Harness {
        service: PasteService,
        store: Arc<MemoryPasteStore>,
        processor: Arc<EchoProcessor>,
    }

    async fn harness() -> anyhow::Result<Harness> {
        let store = Arc::new(MemoryPasteStore::new());
        let processor = Arc::new(EchoProcessor::default());
        let defaults =
            DefaultPasteRegistry::build(&SdkRegistry::standard(), processor.as_ref()).await?;
        processor.calls.store(0, Ordering::SeqCst);
        let service = PasteService::new(store.clone(), processor.clone(), Arc::new(defaults));
        Ok(Harness {
            service,
            store,
            processor,
        })
    }

    fn java(code: &str) -> ProcessingInput {
        ProcessingInput::new(code, "JAVA")
    }

    #[tokio::test]
    async fn create_get_update_cycle() -> anyhow::Result<()> {
        let Harness { service, .. } = harness().await?;
        let token = "abcdef";
        let input1 = java("test code 1");
        let input2 = java("test code 2");

        let created = service.create(Some(token), input1.clone()).await?;
        assert!(created.editable);
        assert_eq!(
            created.paste,
            Paste {
                id: created.paste.id.clone(),
                owner_token: token.to_string(),
                input: input1.clone(),
                output: expected_output(&input1),
            }
        );

        let fetched = service.get(Some(token), &created.paste.id).await?;
        assert_eq!(fetched.paste, created.paste);
        assert!(fetched.editable);

        let updated = service
            .update(Some(token), &created.paste.id, Some(input2.clone()))
            .await?;
        assert!(updated.editable);
        assert_eq!(
            updated.paste,
            created
                .paste
                .with_contents(input2.clone(), expected_output(&input2))
        );

        let anonymous = service.get(None, &created.paste.id).await?;
        assert_eq!(anonymous.paste, updated.paste);
        assert!(!anonymous.editable);
        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_paste_is_not_found() -> anyhow::Result<()> {
        let Harness { service, .. } = harness().await?;
        let err = service.get(None, "xyz").await.err();
        assert!(matches!(err, Some(PasteError::PasteNotFound { id }) if id == "xyz"));
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_paste_is_not_found() -> anyhow::Result<()> {
        let Harness { service, .. } = harness().await?;
        let err = service.update(Some("abcdef"), "xyz", None).await.err();
        assert!(matches!(err, Some(PasteError::PasteNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn invalid_tokens_are_rejected_before_processing() -> anyhow::Result<()> {
        let Harness {
            service,
            store,
            processor,
        } = harness().await?;
        for token in [None, Some(""), Some("#")] {
            let create = service.create(token, java("abc")).await.err();
            assert!(matches!(create, Some(PasteError::InvalidOwnerToken)));

            let update = service.update(token, "xyz", Some(java("abc"))).await.err();
            assert!(matches!(update, Some(PasteError::InvalidOwnerToken)));
        }
        assert!(store.is_empty().await);
        assert_eq!(processor.calls.load(Ordering::SeqCst), 0);
        Ok(())
    }

    #[tokio::test]
    async fn update_by_other_token_is_denied_and_leaves_paste_untouched() -> anyhow::Result<()> {
        let Harness { service, .. } = harness().await?;
        let created = service.create(Some("abc"), java("abc")).await?;

        let err = service
            .update(Some("def"), &created.paste.id, Some(java("def")))
            .await
            .err();
        assert!(matches!(err, Some(PasteError::OwnershipMismatch { .. })));

        let invalid_input = service
            .update(
                Some("def"),
                &created.paste.id,
                Some(ProcessingInput::new("def", "COBOL")),
            )
            .await
            .err();
        assert!(matches!(
            invalid_input,
            Some(PasteError::OwnershipMismatch { .. })
        ));

        let current = service.get(Some("abc"), &created.paste.id).await?;
        assert_eq!(current.paste, created.paste);
        Ok(())
    }

    #[tokio::test]
    async fn update_without_input_returns_current_state() -> anyhow::Result<()> {
        let Harness {
            service, processor, ..
        } = harness().await?;
        let created = service.create(Some("abc"), java("abc")).await?;
        let calls = processor.calls.load(Ordering::SeqCst);

        let touched = service.update(Some("abc"), &created.paste.id, None).await?;
        assert_eq!(touched, created);
        assert_eq!(processor.calls.load(Ordering::SeqCst), calls);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_compiler_is_reported_and_nothing_changes() -> anyhow::Result<()> {
        let Harness { service, store, .. } = harness().await?;
        let err = service
            .create(Some("abc"), ProcessingInput::new("x", "COBOL"))
            .await
            .err();
        assert!(matches!(err, Some(PasteError::UnknownCompilerTarget { name }) if name == "COBOL"));
        assert!(store.is_empty().await);

        let created = service.create(Some("abc"), java("x")).await?;
        let err = service
            .update(
                Some("abc"),
                &created.paste.id,
                Some(ProcessingInput::new("y", "COBOL")),
            )
            .await
            .err();
        assert!(matches!(
            err,
            Some(PasteError::UnknownCompilerTarget { .. })
        ));
        assert_eq!(
            service.get(None, &created.paste.id).await?.paste,
            created.paste
        );
        Ok(())
    }

    #[tokio::test]
    async fn default_pastes_are_read_only() -> anyhow::Result<()> {
        let Harness { service, .. } = harness().await?;
        let first = service.get(None, "default:JAVA").await?;
        assert_eq!(first.paste, service.defaults().pastes()[0]);
        assert!(!first.editable);

        let with_token = service.get(Some("abcdef"), "default:JAVA").await?;
        assert_eq!(with_token, first);

        let err = service
            .update(Some("abcdef"), "default:JAVA", Some(java("x")))
            .await
            .err();
        assert!(matches!(err, Some(PasteError::OwnershipMismatch { .. })));

        let missing = service.get(None, "default:COBOL").await.err();
        assert!(matches!(missing, Some(PasteError::PasteNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn created_ids_never_enter_default_namespace() -> anyhow::Result<()> {
        let Harness { service, .. } = harness().await?;
        for _ in 0..16 {
            let view = service.create(Some("abc"), java("x")).await?;
            assert!(!is_default_id(&view.paste.id));
        }
        Ok(())
    }
}
