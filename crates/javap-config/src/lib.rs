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

//! Environment-driven configuration for the javap service.
//!
//! Layout: `model.rs` (typed settings), `defaults.rs` (fallback values),
//! `validate.rs` (parsing helpers), `loader.rs` (`AppConfig::from_env`).

mod defaults;
pub mod error;
pub mod loader;
pub mod model;
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use model::{
    AppConfig, DatabaseSettings, HttpSettings, LogFormatChoice, LoggingSettings, ProcessorSettings,
};
