//! Chat-list aggregation.
//!
//! A snapshot of the `chats` collection is a flat list of messages. The chat
//! list shows one row per conversation, built from the most recent message in
//! that conversation. [`ConversationAggregator`] does that reduction. It holds
//! nothing but the time zone used for rendering, so it is re-run from scratch
//! on every snapshot and may be shared freely between threads.

use std::collections::HashMap;
use std::fmt::Display;

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::clock::format_clock_in;
use crate::constants::{PLACEHOLDER_DISPLAY_NAME, PLACEHOLDER_PREVIEW};
use crate::record::MessageRecord;
use crate::types::ConversationId;

/// One chat-list row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub conversation_id: ConversationId,
    /// Sender of the most recent message.
    pub display_name: String,
    /// Body of the most recent message.
    pub preview_text: String,
    /// `hh:mm AM/PM` of the most recent message, in the aggregator's zone.
    pub last_activity_display: String,
}

/// Reduces message records to one [`ConversationSummary`] per conversation.
#[derive(Debug, Clone)]
pub struct ConversationAggregator<Tz: TimeZone = Local> {
    tz: Tz,
}

impl ConversationAggregator<Local> {
    /// Aggregator rendering times in the observer's local zone.
    pub fn local() -> Self {
        Self { tz: Local }
    }
}

impl Default for ConversationAggregator<Local> {
    fn default() -> Self {
        Self::local()
    }
}

impl<Tz> ConversationAggregator<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub fn with_timezone(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    /// Build the chat list for a snapshot.
    ///
    /// Rows are ordered by latest activity, newest first. Conversations whose
    /// latest messages share a timestamp keep the order in which they first
    /// appear in `records`.
    pub fn aggregate<'a, I>(&self, records: I) -> Vec<ConversationSummary>
    where
        I: IntoIterator<Item = &'a MessageRecord>,
    {
        let mut latest = latest_per_conversation(records);
        latest.sort_by(|a, b| b.1.sent_at_epoch_millis.cmp(&a.1.sent_at_epoch_millis));

        let summaries: Vec<ConversationSummary> = latest
            .into_iter()
            .map(|(conversation_id, record)| self.summarize(conversation_id, record))
            .collect();

        tracing::trace!(conversations = summaries.len(), "aggregated snapshot");
        summaries
    }

    fn summarize(
        &self,
        conversation_id: ConversationId,
        record: &MessageRecord,
    ) -> ConversationSummary {
        ConversationSummary {
            conversation_id,
            display_name: or_placeholder(&record.sender_name, PLACEHOLDER_DISPLAY_NAME),
            preview_text: or_placeholder(&record.body, PLACEHOLDER_PREVIEW),
            last_activity_display: format_clock_in(record.sent_at_epoch_millis, &self.tz),
        }
    }
}

/// Aggregate in the local time zone.
pub fn aggregate<'a, I>(records: I) -> Vec<ConversationSummary>
where
    I: IntoIterator<Item = &'a MessageRecord>,
{
    ConversationAggregator::local().aggregate(records)
}

/// Most recent record of each conversation, in order of first appearance.
///
/// Among records sharing the maximum timestamp the first one encountered wins.
pub fn latest_per_conversation<'a, I>(records: I) -> Vec<(ConversationId, &'a MessageRecord)>
where
    I: IntoIterator<Item = &'a MessageRecord>,
{
    let mut slots: HashMap<ConversationId, usize> = HashMap::new();
    let mut latest: Vec<(ConversationId, &'a MessageRecord)> = Vec::new();

    for record in records {
        let key = record.conversation_key();
        match slots.get(&key) {
            Some(&slot) => {
                if record.sent_at_epoch_millis > latest[slot].1.sent_at_epoch_millis {
                    latest[slot].1 = record;
                }
            }
            None => {
                slots.insert(key.clone(), latest.len());
                latest.push((key, record));
            }
        }
    }

    latest
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use chrono::Utc;

    fn record(id: Option<&str>, sender: &str, body: &str, at: i64) -> MessageRecord {
        MessageRecord {
            conversation_id: id.map(str::to_owned),
            sender_name: sender.to_string(),
            body: body.to_string(),
            sent_at_epoch_millis: at,
            is_from_current_user: false,
        }
    }

    fn utc() -> ConversationAggregator<Utc> {
        ConversationAggregator::with_timezone(Utc)
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let records: Vec<MessageRecord> = Vec::new();
        assert!(utc().aggregate(&records).is_empty());
    }

    #[test]
    fn latest_message_becomes_the_preview() {
        let records = vec![
            record(Some("c1"), "Alice", "hi", 100),
            record(Some("c1"), "Alice", "bye", 200),
        ];

        let summaries = utc().aggregate(&records);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].conversation_id.as_str(), "c1");
        assert_eq!(summaries[0].preview_text, "bye");
        assert_eq!(summaries[0].display_name, "Alice");
    }

    #[test]
    fn unsorted_input_still_picks_latest() {
        let records = vec![
            record(Some("c1"), "Bob", "third", 300),
            record(Some("c1"), "Alice", "first", 100),
            record(Some("c1"), "Carol", "second", 200),
        ];

        let summaries = utc().aggregate(&records);
        assert_eq!(summaries[0].preview_text, "third");
        assert_eq!(summaries[0].display_name, "Bob");
    }

    #[test]
    fn missing_id_and_empty_fields_use_placeholders() {
        let records = vec![record(None, "", "", 0)];

        let summaries = utc().aggregate(&records);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].conversation_id.as_str(), "unknown");
        assert_eq!(summaries[0].display_name, PLACEHOLDER_DISPLAY_NAME);
        assert_eq!(summaries[0].preview_text, PLACEHOLDER_PREVIEW);
        assert_eq!(summaries[0].last_activity_display, "12:00 AM");
    }

    #[test]
    fn missing_ids_share_one_group() {
        let records = vec![
            record(None, "A", "one", 1),
            record(Some("c1"), "B", "two", 2),
            record(None, "C", "three", 3),
        ];

        let summaries = utc().aggregate(&records);
        assert_eq!(summaries.len(), 2);
        let unknown = summaries
            .iter()
            .find(|s| s.conversation_id.is_unknown())
            .unwrap();
        assert_eq!(unknown.preview_text, "three");
    }

    #[test]
    fn equal_timestamps_pick_first_in_input_order() {
        let records = vec![
            record(Some("c1"), "Alice", "first", 500),
            record(Some("c1"), "Bob", "second", 500),
        ];

        let aggregator = utc();
        let first = aggregator.aggregate(&records);
        let second = aggregator.aggregate(&records);

        assert_eq!(first.len(), 1);
        assert_eq!(first[0].preview_text, "first");
        assert_eq!(first, second);
    }

    #[test]
    fn one_summary_per_distinct_conversation() {
        let records = vec![
            record(Some("a"), "A", "1", 10),
            record(Some("b"), "B", "2", 20),
            record(Some(""), "E", "3", 30),
            record(None, "N", "4", 40),
            record(Some("a"), "A", "5", 50),
            record(Some("b"), "B", "6", 5),
        ];

        let distinct: HashSet<ConversationId> =
            records.iter().map(MessageRecord::conversation_key).collect();
        let summaries = utc().aggregate(&records);

        assert_eq!(summaries.len(), distinct.len());
        let ids: HashSet<ConversationId> =
            summaries.iter().map(|s| s.conversation_id.clone()).collect();
        assert_eq!(ids, distinct);
    }

    #[test]
    fn summaries_match_group_maximum() {
        let records = vec![
            record(Some("a"), "A1", "a-old", 10),
            record(Some("b"), "B1", "b-new", 90),
            record(Some("a"), "A2", "a-new", 70),
            record(Some("b"), "B2", "b-old", 20),
        ];

        for summary in utc().aggregate(&records) {
            let max = records
                .iter()
                .filter(|r| r.conversation_key() == summary.conversation_id)
                .map(|r| r.sent_at_epoch_millis)
                .max()
                .unwrap();
            let expected = records
                .iter()
                .find(|r| {
                    r.conversation_key() == summary.conversation_id
                        && r.sent_at_epoch_millis == max
                })
                .unwrap();
            assert_eq!(summary.preview_text, expected.body);
            assert_eq!(summary.display_name, expected.sender_name);
        }
    }

    #[test]
    fn newest_conversation_comes_first() {
        let records = vec![
            record(Some("old"), "A", "x", 100),
            record(Some("new"), "B", "y", 900),
            record(Some("mid"), "C", "z", 500),
        ];

        let order: Vec<String> = utc()
            .aggregate(&records)
            .into_iter()
            .map(|s| s.conversation_id.0)
            .collect();
        assert_eq!(order, vec!["new", "mid", "old"]);
    }

    #[test]
    fn equal_activity_keeps_first_appearance_order() {
        let records = vec![
            record(Some("b"), "B", "x", 100),
            record(Some("a"), "A", "y", 100),
        ];

        let order: Vec<String> = utc()
            .aggregate(&records)
            .into_iter()
            .map(|s| s.conversation_id.0)
            .collect();
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn summary_serializes_with_camel_case_fields() {
        let summaries = utc().aggregate(&[record(Some("c1"), "Alice", "hi", 0)]);
        let json = serde_json::to_value(&summaries).unwrap();

        assert_eq!(json[0]["conversationId"], "c1");
        assert_eq!(json[0]["displayName"], "Alice");
        assert_eq!(json[0]["previewText"], "hi");
        assert_eq!(json[0]["lastActivityDisplay"], "12:00 AM");
    }

    #[test]
    fn free_function_uses_local_zone() {
        let records = vec![record(Some("c1"), "Alice", "hi", 0)];
        let summaries = aggregate(&records);
        assert_eq!(summaries.len(), 1);
        assert_eq!(
            summaries[0].last_activity_display,
            crate::clock::format_clock(0)
        );
    }
}
