//! In-process stand-in for the hosted document database.

use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::{Result, StoreError};
use crate::snapshot::{DocumentId, Snapshot, StoredDocument};
use crate::store::{MessageStore, Subscription};

/// A [`MessageStore`] held entirely in memory.
///
/// The current snapshot lives in a `watch` channel, so reads never block
/// writers for longer than an `Arc` clone and every subscriber sees each
/// committed write. [`set_available`](Self::set_available) simulates the
/// backend dropping off the network.
pub struct MemoryStore {
    tx: watch::Sender<Snapshot>,
    available: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_documents(Vec::new())
    }

    /// Seed the store with documents, assigning each a fresh id.
    pub fn with_documents(documents: Vec<Value>) -> Self {
        let stored = documents
            .into_iter()
            .map(|data| StoredDocument {
                id: DocumentId::new(),
                data,
            })
            .collect();
        let (tx, _rx) = watch::channel(Snapshot::from_documents(stored));

        Self {
            tx,
            available: AtomicBool::new(true),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
        if !available {
            warn!("memory store marked unavailable");
        }
    }

    fn ensure_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("backend unreachable".into()))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageStore for MemoryStore {
    fn snapshot(&self) -> Result<Snapshot> {
        self.ensure_available()?;
        Ok(self.tx.borrow().clone())
    }

    fn add(&self, document: Value) -> Result<DocumentId> {
        self.ensure_available()?;
        if !document.is_object() {
            return Err(StoreError::InvalidDocument(
                "document must be a JSON object".into(),
            ));
        }

        let id = DocumentId::new();
        let stored = StoredDocument { id, data: document };
        self.tx.send_modify(|snapshot| {
            *snapshot = snapshot.with_document(stored);
        });

        debug!(id = %id, total = self.tx.borrow().len(), "document added");
        Ok(id)
    }

    fn subscribe(&self) -> Result<Subscription> {
        self.ensure_available()?;
        Ok(Subscription::new(self.tx.subscribe()))
    }
}
