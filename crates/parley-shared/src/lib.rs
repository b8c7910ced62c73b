//! # parley-shared
//!
//! Domain types shared by every Parley crate: the message records read from
//! the hosted `chats` collection, the conversation aggregator that turns a
//! snapshot of records into chat-list rows, and the compose-box draft.

pub mod aggregate;
pub mod clock;
pub mod constants;
pub mod draft;
pub mod error;
pub mod record;
pub mod types;

pub use aggregate::{aggregate, ConversationAggregator, ConversationSummary};
pub use draft::MessageDraft;
pub use error::DraftError;
pub use record::MessageRecord;
pub use types::ConversationId;
