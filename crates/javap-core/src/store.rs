//! Persistence seam for user pastes, plus an in-memory implementation.

use std::collections::HashMap;
use std::error::Error;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::model::Paste;

/// Errors raised by paste stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A paste with the same id already exists.
    #[error("duplicate paste id")]
    DuplicateId {
        /// Conflicting id.
        id: String,
    },
    /// The paste to replace does not exist.
    #[error("paste missing from store")]
    Missing {
        /// Missing id.
        id: String,
    },
    /// The storage backend failed.
    #[error("paste store backend failed")]
    Backend {
        /// Operation identifier.
        operation: &'static str,
        /// Underlying backend failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

/// Keyed storage of user pastes.
#[async_trait]
pub trait PasteStore: Send + Sync {
    /// Persist a new paste.
    async fn insert(&self, paste: &Paste) -> Result<(), StoreError>;

    /// Load a paste by id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Paste>, StoreError>;

    /// Replace the stored paste with the same id.
    async fn update(&self, paste: &Paste) -> Result<(), StoreError>;
}

/// Process-local paste store.
#[derive(Debug, Default)]
pub struct MemoryPasteStore {
    pastes: RwLock<HashMap<String, Paste>>,
}

impl MemoryPasteStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PasteStore for MemoryPasteStore {
    async fn insert(&self, paste: &Paste) -> Result<(), StoreError> {
        let mut guard = self.pastes.write().await;
        if guard.contains_key(&paste.id) {
            return Err(StoreError::DuplicateId {
                id: paste.id.clone(),
            });
        }
        guard.insert(paste.id.clone(), paste.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Paste>, StoreError> {
        Ok(self.pastes.read().await.get(id).cloned())
    }

    async fn update(&self, paste: &Paste) -> Result<(), StoreError> {
        let mut guard = self.pastes.write().await;
        match guard.get_mut(&paste.id) {
            Some(existing) => {
                *existing = paste.clone();
                Ok(())
            }
            None => Err(StoreError::Missing {
                id: paste.id.clone(),
            }),
        }
    }
}
