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

//! [`javap_core::Processor`] implementations backed by external JVM tools.
//!
//! # Design
//! - Every paste is compiled in its own temporary directory that is removed
//!   once processing finishes.
//! - Tool failures, timeouts, and missing binaries are reported as text in the
//!   output rather than as errors; only unknown toolchains are rejected.

mod command;
mod metered;
mod processor;
mod toolchain;

pub use metered::MeteredProcessor;
pub use processor::CommandProcessor;
