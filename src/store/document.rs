//! In-process document store.
//!
//! Named collections of JSON documents keyed by UUID. The API is async so
//! call sites read the same whether the store is in-process or remote; the
//! in-process implementation completes without suspending.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::config::StoreConfig;

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("document encode/decode failed: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Connection handle to the document store.
///
/// Created once at startup, owned by the caller, and shared via `Arc`.
pub struct DocumentStore {
    name: String,
    collections: DashMap<String, Arc<Collection>>,
}

impl DocumentStore {
    /// Open a handle against the configured database.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        if config.name.trim().is_empty() {
            return Err(StoreError::Unavailable("store name is empty".to_string()));
        }

        tracing::info!(store = %config.name, "Document store ready");
        Ok(Self {
            name: config.name.clone(),
            collections: DashMap::new(),
        })
    }

    /// Fetch a collection by name, creating it on first access.
    pub fn collection(&self, name: &str) -> Arc<Collection> {
        self.collections
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Collection::new()))
            .clone()
    }

    /// Logical database name this handle is opened against.
    pub fn name(&self) -> &str {
        &self.name
    }
}

struct StoredDoc {
    seq: u64,
    value: Value,
}

/// A named set of JSON documents keyed by UUID.
pub struct Collection {
    docs: DashMap<Uuid, StoredDoc>,
    seq: AtomicU64,
}

impl Collection {
    fn new() -> Self {
        Self {
            docs: DashMap::new(),
            seq: AtomicU64::new(0),
        }
    }

    /// Insert a document under the given id, replacing any existing one.
    pub async fn insert<T: Serialize>(&self, id: Uuid, doc: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(doc)?;
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        self.docs.insert(id, StoredDoc { seq, value });
        Ok(())
    }

    /// Fetch a document by id.
    pub async fn get<T: DeserializeOwned>(&self, id: &Uuid) -> Result<Option<T>, StoreError> {
        match self.docs.get(id) {
            Some(doc) => Ok(Some(serde_json::from_value(doc.value.clone())?)),
            None => Ok(None),
        }
    }

    /// List all documents in insertion order.
    pub async fn list<T: DeserializeOwned>(&self) -> Result<Vec<T>, StoreError> {
        let mut entries: Vec<(u64, Value)> = self
            .docs
            .iter()
            .map(|entry| (entry.seq, entry.value.clone()))
            .collect();
        entries.sort_by_key(|(seq, _)| *seq);

        entries
            .into_iter()
            .map(|(_, value)| serde_json::from_value(value).map_err(StoreError::from))
            .collect()
    }

    /// Replace an existing document. Returns `false` when the id is absent.
    ///
    /// The document keeps its original sequence number, so an update does
    /// not change its position in listings.
    pub async fn replace<T: Serialize>(&self, id: Uuid, doc: &T) -> Result<bool, StoreError> {
        let value = serde_json::to_value(doc)?;
        match self.docs.get_mut(&id) {
            Some(mut existing) => {
                existing.value = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a document, returning it when present.
    pub async fn remove<T: DeserializeOwned>(&self, id: &Uuid) -> Result<Option<T>, StoreError> {
        match self.docs.remove(id) {
            Some((_, doc)) => Ok(Some(serde_json::from_value(doc.value)?)),
            None => Ok(None),
        }
    }

    /// Number of documents currently held.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}
