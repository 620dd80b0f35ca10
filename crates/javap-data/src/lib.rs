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

//! Postgres data access layer for pastes: migrations, pool setup, and the paste repository.

pub mod error;
pub mod pastes;

pub use error::{DataError, Result as DataResult};
pub use pastes::{PgPasteStore, connect};
