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

//! Paste processing core: data model, toolchain registry, processor contract,
//! default pastes, storage contract, and the paste service that ties them together.
//!
//! Layout: `model.rs` (values), `sdk.rs` (toolchains), `processor.rs` (processing seam),
//! `defaults.rs` (built-in pastes), `store.rs` (persistence seam), `token.rs` (owner
//! tokens and ids), `service.rs` (create/get/update orchestration).

pub mod defaults;
pub mod error;
pub mod model;
pub mod processor;
pub mod sdk;
pub mod service;
pub mod store;
pub mod token;

pub use defaults::{DEFAULT_ID_PREFIX, DefaultPasteRegistry};
pub use error::{PasteError, PasteResult};
pub use model::{Paste, PasteView, ProcessingInput, ProcessingOutput};
pub use processor::{Processor, ProcessorError};
pub use sdk::{Language, Sdk, SdkRegistry};
pub use service::PasteService;
pub use store::{MemoryPasteStore, PasteStore, StoreError};
