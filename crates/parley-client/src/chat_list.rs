use std::fmt::Display;

use chrono::TimeZone;
use parley_shared::constants::EMPTY_CHAT_LIST;
use parley_shared::{ConversationAggregator, ConversationSummary};
use parley_store::{MessageStore, Snapshot};
use serde::Serialize;
use tracing::{debug, warn};

/// What the chat list screen shows.
///
/// A failed fetch is [`Failed`](Self::Failed), never an empty
/// [`Ready`](Self::Ready): "no conversations" and "could not load" read
/// differently to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "camelCase")]
pub enum ChatListState {
    #[default]
    Loading,
    Ready(Vec<ConversationSummary>),
    Failed(String),
}

impl ChatListState {
    pub fn from_snapshot<Tz>(
        snapshot: &Snapshot,
        aggregator: &ConversationAggregator<Tz>,
    ) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let records = snapshot.records();
        Self::Ready(aggregator.aggregate(&records))
    }

    /// Rows to draw; empty while loading or after a failure.
    pub fn conversations(&self) -> &[ConversationSummary] {
        match self {
            Self::Ready(summaries) => summaries,
            Self::Loading | Self::Failed(_) => &[],
        }
    }

    /// Text for a successfully loaded but empty list.
    pub fn empty_text(&self) -> Option<&'static str> {
        match self {
            Self::Ready(summaries) if summaries.is_empty() => Some(EMPTY_CHAT_LIST),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// One-shot fetch of the chat list.
pub fn load_chat_list<S, Tz>(store: &S, aggregator: &ConversationAggregator<Tz>) -> ChatListState
where
    S: MessageStore + ?Sized,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match store.snapshot() {
        Ok(snapshot) => {
            let state = ChatListState::from_snapshot(&snapshot, aggregator);
            debug!(
                documents = snapshot.len(),
                conversations = state.conversations().len(),
                "chat list loaded"
            );
            state
        }
        Err(e) => {
            warn!(error = %e, "failed to load chat list");
            ChatListState::Failed(e.to_string())
        }
    }
}
