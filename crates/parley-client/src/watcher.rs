//! Live chat list.
//!
//! Subscribes to the store and re-runs the aggregator on every snapshot it
//! delivers. Nothing carries over between snapshots.

use std::fmt::Display;

use chrono::TimeZone;
use parley_shared::ConversationAggregator;
use parley_store::{MessageStore, Snapshot};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::chat_list::ChatListState;
use crate::error::Result;

/// A snapshot together with the chat list computed from it.
#[derive(Debug, Clone)]
pub struct ChatListUpdate {
    pub snapshot: Snapshot,
    pub chat_list: ChatListState,
}

/// Spawn a task pushing a [`ChatListUpdate`] into `updates` for the current
/// snapshot and then for every change.
///
/// The task ends when the store goes away or the receiver is dropped.
/// Failing to subscribe is reported to the caller rather than as an empty
/// list.
pub fn watch_chat_list<S, Tz>(
    store: &S,
    aggregator: ConversationAggregator<Tz>,
    updates: mpsc::Sender<ChatListUpdate>,
) -> Result<JoinHandle<()>>
where
    S: MessageStore + ?Sized,
    Tz: TimeZone + Send + 'static,
    Tz::Offset: Display + Send,
{
    let mut subscription = store.subscribe()?;

    let handle = tokio::spawn(async move {
        loop {
            let snapshot = tokio::select! {
                next = subscription.next() => match next {
                    Some(snapshot) => snapshot,
                    None => {
                        debug!("store closed, chat list watcher exiting");
                        break;
                    }
                },
                _ = updates.closed() => {
                    debug!("chat list receiver dropped, watcher exiting");
                    break;
                }
            };

            let chat_list = ChatListState::from_snapshot(&snapshot, &aggregator);
            if updates.send(ChatListUpdate { snapshot, chat_list }).await.is_err() {
                break;
            }
        }
        info!("chat list watcher stopped");
    });

    Ok(handle)
}
