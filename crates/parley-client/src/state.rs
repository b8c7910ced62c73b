//! Presentation state shared by the screens.
//!
//! The store owns the authoritative message list. [`AppState`] keeps only the
//! most recent snapshot it was handed and the chat list derived from it; both
//! are replaced wholesale on every update.

use std::fmt::Display;

use chrono::TimeZone;
use parley_shared::{ConversationAggregator, ConversationId};
use parley_store::Snapshot;

use crate::chat_list::ChatListState;
use crate::session::User;
use crate::thread::ThreadView;
use crate::watcher::ChatListUpdate;

/// Central presentation state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Signed-in account. `None` shows the login screen.
    pub user: Option<User>,

    /// Latest snapshot received from the store.
    latest: Option<Snapshot>,

    chat_list: ChatListState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chat_list(&self) -> &ChatListState {
        &self.chat_list
    }

    pub fn latest_snapshot(&self) -> Option<&Snapshot> {
        self.latest.as_ref()
    }

    /// Replace the cached snapshot and the chat list derived from it.
    pub fn apply_update(&mut self, update: ChatListUpdate) {
        self.latest = Some(update.snapshot);
        self.chat_list = update.chat_list;
    }

    pub fn apply_snapshot<Tz>(
        &mut self,
        snapshot: Snapshot,
        aggregator: &ConversationAggregator<Tz>,
    ) where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let chat_list = ChatListState::from_snapshot(&snapshot, aggregator);
        self.apply_update(ChatListUpdate { snapshot, chat_list });
    }

    /// Record a failed fetch. The cached snapshot is dropped so no screen keeps
    /// rendering stale rows as if they were current.
    pub fn apply_failure(&mut self, error: impl Display) {
        self.latest = None;
        self.chat_list = ChatListState::Failed(error.to_string());
    }

    /// Thread view for a conversation from the cached snapshot; empty until
    /// the first snapshot arrives.
    pub fn thread<Tz>(&self, conversation: &ConversationId, tz: &Tz) -> ThreadView
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match &self.latest {
            Some(snapshot) => ThreadView::from_snapshot(snapshot, Some(conversation), tz),
            None => ThreadView::default(),
        }
    }
}
