//! Immutable point-in-time reads of the `chats` collection.

use std::sync::Arc;

use parley_shared::constants::FIELD_TIME;
use parley_shared::record::epoch_millis;
use parley_shared::MessageRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Store-assigned document identifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct DocumentId(pub Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A document as held by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredDocument {
    pub id: DocumentId,
    pub data: Value,
}

impl StoredDocument {
    /// Ordering key; documents without a usable numeric `time` sort as 0.
    pub fn time(&self) -> i64 {
        self.data.get(FIELD_TIME).and_then(epoch_millis).unwrap_or(0)
    }

    pub fn record(&self) -> MessageRecord {
        MessageRecord::from_document(&self.data)
    }
}

/// Every document in the collection, ordered by `time` ascending.
///
/// Documents with equal times stay in insertion order. Cloning shares the
/// underlying list.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    documents: Arc<[StoredDocument]>,
}

impl Snapshot {
    /// Build a snapshot from documents in insertion order.
    pub fn from_documents(mut documents: Vec<StoredDocument>) -> Self {
        documents.sort_by_key(StoredDocument::time);
        Self {
            documents: documents.into(),
        }
    }

    /// A new snapshot with `document` placed after every document whose time
    /// is not later than its own.
    pub fn with_document(&self, document: StoredDocument) -> Self {
        let time = document.time();
        let at = self.documents.partition_point(|d| d.time() <= time);

        let mut documents = Vec::with_capacity(self.documents.len() + 1);
        documents.extend_from_slice(&self.documents[..at]);
        documents.push(document);
        documents.extend_from_slice(&self.documents[at..]);

        Self {
            documents: documents.into(),
        }
    }

    pub fn documents(&self) -> &[StoredDocument] {
        &self.documents
    }

    /// Decode every document into a [`MessageRecord`].
    pub fn records(&self) -> Vec<MessageRecord> {
        self.documents.iter().map(StoredDocument::record).collect()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(message: &str, time: i64) -> StoredDocument {
        StoredDocument {
            id: DocumentId::new(),
            data: json!({ "message": message, "time": time }),
        }
    }

    fn bodies(snapshot: &Snapshot) -> Vec<String> {
        snapshot.records().into_iter().map(|r| r.body).collect()
    }

    #[test]
    fn documents_are_ordered_by_time() {
        let snapshot = Snapshot::from_documents(vec![doc("c", 30), doc("a", 10), doc("b", 20)]);
        assert_eq!(bodies(&snapshot), vec!["a", "b", "c"]);
    }

    #[test]
    fn equal_times_keep_insertion_order() {
        let snapshot = Snapshot::from_documents(vec![doc("first", 5), doc("second", 5)])
            .with_document(doc("third", 5));
        assert_eq!(bodies(&snapshot), vec!["first", "second", "third"]);
    }

    #[test]
    fn with_document_inserts_in_time_position() {
        let before = Snapshot::from_documents(vec![doc("a", 10), doc("c", 30)]);
        let after = before.with_document(doc("b", 20));

        assert_eq!(bodies(&before), vec!["a", "c"]);
        assert_eq!(bodies(&after), vec!["a", "b", "c"]);
    }

    #[test]
    fn missing_time_sorts_first() {
        let untimed = StoredDocument {
            id: DocumentId::new(),
            data: json!({ "message": "untimed" }),
        };
        let snapshot = Snapshot::from_documents(vec![doc("timed", 1), untimed]);
        assert_eq!(bodies(&snapshot), vec!["untimed", "timed"]);
    }

    #[test]
    fn float_times_order_with_integer_times() {
        let float = StoredDocument {
            id: DocumentId::new(),
            data: json!({ "message": "float", "time": 20.0 }),
        };
        let snapshot = Snapshot::from_documents(vec![doc("late", 30), float, doc("early", 10)]);

        assert_eq!(snapshot.documents()[1].time(), 20);
        assert_eq!(bodies(&snapshot), vec!["early", "float", "late"]);
    }
}
