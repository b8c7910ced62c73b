//! Message records as read from the hosted `chats` collection.
//!
//! Documents in the collection are loosely typed: any field may be missing or
//! hold the wrong JSON type. Decoding never fails; a bad field decodes to its
//! default and the chat list shows a placeholder instead. The same leniency
//! applies to records arriving as camelCase JSON.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::constants::{
    FIELD_CHAT_ID, FIELD_IS_CURRENT_USER, FIELD_MESSAGE, FIELD_NAME, FIELD_TIME,
};
use crate::types::ConversationId;

/// Field names of one encoding of a [`MessageRecord`].
struct FieldNames {
    conversation_id: &'static str,
    sender_name: &'static str,
    body: &'static str,
    sent_at: &'static str,
    is_from_current_user: &'static str,
}

/// Store document fields.
const DOCUMENT_FIELDS: FieldNames = FieldNames {
    conversation_id: FIELD_CHAT_ID,
    sender_name: FIELD_NAME,
    body: FIELD_MESSAGE,
    sent_at: FIELD_TIME,
    is_from_current_user: FIELD_IS_CURRENT_USER,
};

/// camelCase JSON fields, as serialized.
const JSON_FIELDS: FieldNames = FieldNames {
    conversation_id: "conversationId",
    sender_name: "senderName",
    body: "body",
    sent_at: "sentAtEpochMillis",
    is_from_current_user: "isFromCurrentUser",
};

/// A single chat message, read-only on this side of the store.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    /// Conversation this message belongs to, if the writer set one.
    pub conversation_id: Option<String>,
    pub sender_name: String,
    pub body: String,
    /// Milliseconds since the Unix epoch, assigned by the sender.
    pub sent_at_epoch_millis: i64,
    pub is_from_current_user: bool,
}

impl MessageRecord {
    /// Decode a store document, substituting defaults for anything missing.
    pub fn from_document(doc: &Value) -> Self {
        Self::decode(doc, &DOCUMENT_FIELDS)
    }

    /// Decode a camelCase JSON record with the same leniency as
    /// [`from_document`](Self::from_document).
    pub fn from_json(value: &Value) -> Self {
        Self::decode(value, &JSON_FIELDS)
    }

    fn decode(value: &Value, names: &FieldNames) -> Self {
        let Some(fields) = value.as_object() else {
            tracing::debug!("non-object record decoded as empty record");
            return Self::default();
        };

        Self {
            conversation_id: string_field(fields, names.conversation_id),
            sender_name: string_field(fields, names.sender_name).unwrap_or_default(),
            body: string_field(fields, names.body).unwrap_or_default(),
            sent_at_epoch_millis: fields.get(names.sent_at).and_then(epoch_millis).unwrap_or(0),
            is_from_current_user: fields
                .get(names.is_from_current_user)
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }
    }

    /// Grouping key, with a missing id folded into `"unknown"`.
    pub fn conversation_key(&self) -> ConversationId {
        ConversationId::from_option(self.conversation_id.as_deref())
    }
}

impl<'de> Deserialize<'de> for MessageRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// Read any JSON number as epoch milliseconds.
///
/// Floats are truncated toward zero. Values outside the `i64` range, and
/// anything that is not a number, give `None`.
pub fn epoch_millis(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    if let Some(n) = value.as_u64() {
        return i64::try_from(n).ok();
    }

    let f = value.as_f64()?;
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}
