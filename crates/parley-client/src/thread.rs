//! The message thread screen and its compose box.

use std::fmt::Display;

use chrono::{TimeZone, Utc};
use parley_shared::clock::format_clock_in;
use parley_shared::constants::PLACEHOLDER_DISPLAY_NAME;
use parley_shared::{ConversationId, MessageDraft, MessageRecord};
use parley_store::{DocumentId, MessageStore, Snapshot};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;

/// One message as drawn in the thread.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ThreadBubble {
    pub body: String,
    pub time_display: String,
    /// Right-aligned when set.
    pub is_from_current_user: bool,
}

/// Messages of one conversation, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadView {
    conversation: Option<ConversationId>,
    title: String,
    bubbles: Vec<ThreadBubble>,
}

impl ThreadView {
    /// Build the thread for `conversation`, or for the whole collection when
    /// `None`. Selecting `"unknown"` shows the messages that carry no
    /// conversation id.
    pub fn from_snapshot<Tz>(
        snapshot: &Snapshot,
        conversation: Option<&ConversationId>,
        tz: &Tz,
    ) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let records: Vec<MessageRecord> = snapshot
            .records()
            .into_iter()
            .filter(|r| conversation.map_or(true, |c| r.conversation_key() == *c))
            .collect();

        let title = records
            .iter()
            .rev()
            .find(|r| !r.is_from_current_user && !r.sender_name.is_empty())
            .map(|r| r.sender_name.clone())
            .unwrap_or_else(|| PLACEHOLDER_DISPLAY_NAME.to_string());

        let bubbles = records
            .into_iter()
            .map(|r| ThreadBubble {
                time_display: format_clock_in(r.sent_at_epoch_millis, tz),
                body: r.body,
                is_from_current_user: r.is_from_current_user,
            })
            .collect();

        Self {
            conversation: conversation.cloned(),
            title,
            bubbles,
        }
    }

    pub fn conversation(&self) -> Option<&ConversationId> {
        self.conversation.as_ref()
    }

    /// Name of the other party: the latest sender who is not the current user.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn bubbles(&self) -> &[ThreadBubble] {
        &self.bubbles
    }

    pub fn into_bubbles(self) -> Vec<ThreadBubble> {
        self.bubbles
    }
}

/// Send the compose box contents, stamped with the current time.
///
/// Blank drafts are refused without touching the store.
pub fn send_message<S>(store: &S, draft: MessageDraft) -> Result<DocumentId>
where
    S: MessageStore + ?Sized,
{
    let conversation = ConversationId::from_option(draft.conversation_id.as_deref());
    let document = draft.into_document(Utc::now().timestamp_millis())?;
    let id = store.add(document)?;

    info!(id = %id, conversation = %conversation, "message sent");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use parley_shared::DraftError;
    use parley_store::{MemoryStore, StoreError};
    use serde_json::json;

    fn store() -> MemoryStore {
        MemoryStore::with_documents(vec![
            json!({ "chatId": "c1", "name": "Alice", "message": "second", "time": 3_600_000 }),
            json!({ "chatId": "c2", "name": "Bob", "message": "other", "time": 50 }),
            json!({
                "chatId": "c1",
                "name": "Me",
                "message": "first",
                "time": 0,
                "isCurrentUser": true,
            }),
            json!({ "message": "orphan", "time": 10 }),
        ])
    }

    #[test]
    fn thread_shows_one_conversation_oldest_first() {
        let snapshot = store().snapshot().unwrap();
        let view = ThreadView::from_snapshot(&snapshot, Some(&"c1".into()), &Utc);

        let bodies: Vec<&str> = view.bubbles().iter().map(|b| b.body.as_str()).collect();
        assert_eq!(bodies, vec!["first", "second"]);
        assert!(view.bubbles()[0].is_from_current_user);
        assert_eq!(view.bubbles()[0].time_display, "12:00 AM");
        assert_eq!(view.bubbles()[1].time_display, "01:00 AM");
        assert_eq!(view.title(), "Alice");
    }

    #[test]
    fn unknown_selects_messages_without_id() {
        let snapshot = store().snapshot().unwrap();
        let unknown = ConversationId::unknown();
        let view = ThreadView::from_snapshot(&snapshot, Some(&unknown), &Utc);

        assert_eq!(view.bubbles().len(), 1);
        assert_eq!(view.bubbles()[0].body, "orphan");
        assert_eq!(view.title(), PLACEHOLDER_DISPLAY_NAME);
    }

    #[test]
    fn no_selection_shows_whole_collection() {
        let snapshot = store().snapshot().unwrap();
        let view = ThreadView::from_snapshot(&snapshot, None, &Utc);
        assert_eq!(view.bubbles().len(), 4);
        assert_eq!(view.conversation(), None);
    }

    #[test]
    fn sent_message_appears_in_thread() {
        let store = store();
        let draft = MessageDraft::new(Some("c1".into()), "Me", "third");
        send_message(&store, draft).unwrap();

        let snapshot = store.snapshot().unwrap();
        let view = ThreadView::from_snapshot(&snapshot, Some(&"c1".into()), &Utc);
        let last = view.bubbles().last().unwrap();
        assert_eq!(last.body, "third");
        assert!(last.is_from_current_user);
    }

    #[test]
    fn blank_draft_writes_nothing() {
        let store = store();
        let err = send_message(&store, MessageDraft::new(None, "Me", "   ")).unwrap_err();

        assert!(matches!(err, ClientError::Draft(DraftError::EmptyBody)));
        assert_eq!(store.snapshot().unwrap().len(), 4);
    }

    #[test]
    fn send_fails_when_store_is_down() {
        let store = store();
        store.set_available(false);

        let err = send_message(&store, MessageDraft::new(None, "Me", "hi")).unwrap_err();
        assert!(matches!(err, ClientError::Store(StoreError::Unavailable(_))));
    }
}
