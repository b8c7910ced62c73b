//! # parley-store
//!
//! The message store seam. In production the `chats` collection lives in a
//! hosted document database that owns durability, ordering and change
//! delivery; this crate describes what Parley needs from it
//! ([`MessageStore`]) and ships an in-process [`MemoryStore`] used by tests,
//! the HTTP service and local development. Nothing here is persisted.

pub mod memory;
pub mod snapshot;
pub mod store;

mod error;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use snapshot::{DocumentId, Snapshot, StoredDocument};
pub use store::{MessageStore, Subscription};
