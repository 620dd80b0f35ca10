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

//! Axum router exposing paste creation, retrieval, and update over HTTP.
//!
//! Layout: `error.rs` (server lifecycle errors), `models.rs` (wire types),
//! `state.rs` (shared handler state), `http/` (router, handlers, middleware).

pub mod error;
pub(crate) mod http;
pub mod models;
pub(crate) mod state;

pub use error::{ApiServerError, ApiServerResult};
pub use http::router::ApiServer;
pub use models::{CreatePasteRequest, ProblemDetails, UpdatePasteRequest};
