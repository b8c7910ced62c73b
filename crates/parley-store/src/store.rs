use serde_json::Value;
use tokio::sync::watch;

use crate::error::Result;
use crate::snapshot::{DocumentId, Snapshot};

/// What Parley needs from the document store backing the `chats` collection.
pub trait MessageStore: Send + Sync {
    /// Read the whole collection, ordered by `time`.
    fn snapshot(&self) -> Result<Snapshot>;

    /// Append a document. The store assigns its id and notifies subscribers.
    fn add(&self, document: Value) -> Result<DocumentId>;

    /// Listen for changes. See [`Subscription`].
    fn subscribe(&self) -> Result<Subscription>;
}

/// A live view of the collection.
///
/// The first call to [`next`](Self::next) yields the snapshot current at
/// subscription time; later calls wait for the next change. A subscriber that
/// falls behind skips straight to the latest snapshot.
#[derive(Debug)]
pub struct Subscription {
    rx: watch::Receiver<Snapshot>,
    primed: bool,
}

impl Subscription {
    pub fn new(rx: watch::Receiver<Snapshot>) -> Self {
        Self { rx, primed: false }
    }

    /// Next snapshot, or `None` once the store has gone away.
    pub async fn next(&mut self) -> Option<Snapshot> {
        if !self.primed {
            self.primed = true;
            return Some(self.rx.borrow_and_update().clone());
        }

        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}
