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

//! javap application bootstrap wiring.
//!
//! Layout: `bootstrap.rs` (service wiring), `error.rs` (bootstrap failures).

/// Application bootstrap and environment loading.
pub mod bootstrap;
/// Application-level error type.
pub mod error;

pub use bootstrap::run_app;
pub use error::{AppError, AppResult};
