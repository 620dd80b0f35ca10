//! # Design
//!
//! - One error type for the paste service, ordered the way checks run.
//! - Keep error messages constant; carry the offending id or name in fields.
//! - Storage failures keep their source for diagnostics.

use thiserror::Error;

use crate::store::StoreError;

/// Result alias for paste service operations.
pub type PasteResult<T> = Result<T, PasteError>;

/// Errors raised by the paste service.
#[derive(Debug, Error)]
pub enum PasteError {
    /// Owner token was absent, empty, or contained characters outside `[A-Za-z0-9]`.
    #[error("invalid owner token")]
    InvalidOwnerToken,
    /// No paste exists with the requested id.
    #[error("paste not found")]
    PasteNotFound {
        /// Requested paste id.
        id: String,
    },
    /// The paste exists but the supplied token does not own it.
    #[error("paste is owned by another token")]
    OwnershipMismatch {
        /// Paste id the caller tried to modify.
        id: String,
    },
    /// The processor rejected the toolchain name.
    #[error("unknown compiler target")]
    UnknownCompilerTarget {
        /// Requested toolchain name.
        name: String,
    },
    /// The paste store failed.
    #[error("paste storage failed")]
    Store {
        /// Operation identifier.
        operation: &'static str,
        /// Underlying store error.
        #[source]
        source: StoreError,
    },
}

impl PasteError {
    pub(crate) const fn store(operation: &'static str, source: StoreError) -> Self {
        Self::Store { operation, source }
    }
}
