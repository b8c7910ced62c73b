use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{
    FIELD_CHAT_ID, FIELD_IS_CURRENT_USER, FIELD_MESSAGE, FIELD_NAME, FIELD_TIME,
};
use crate::error::DraftError;

/// Contents of the compose box before it is sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageDraft {
    pub conversation_id: Option<String>,
    pub sender_name: String,
    pub body: String,
}

impl MessageDraft {
    pub fn new(
        conversation_id: Option<String>,
        sender_name: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            conversation_id,
            sender_name: sender_name.into(),
            body: body.into(),
        }
    }

    /// A draft whose body is empty or only whitespace is never sent.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.body.trim().is_empty() {
            return Err(DraftError::EmptyBody);
        }
        Ok(())
    }

    /// Build the store document for this draft, stamped at `sent_at_epoch_millis`.
    ///
    /// The writer is always the current user. Fields the draft leaves empty are
    /// omitted so readers fall back to their placeholders.
    pub fn into_document(self, sent_at_epoch_millis: i64) -> Result<Value, DraftError> {
        self.validate()?;

        let mut doc = Map::new();
        if let Some(id) = self.conversation_id {
            doc.insert(FIELD_CHAT_ID.into(), Value::String(id));
        }
        if !self.sender_name.is_empty() {
            doc.insert(FIELD_NAME.into(), Value::String(self.sender_name));
        }
        doc.insert(FIELD_MESSAGE.into(), Value::String(self.body));
        doc.insert(FIELD_TIME.into(), Value::from(sent_at_epoch_millis));
        doc.insert(FIELD_IS_CURRENT_USER.into(), Value::Bool(true));

        Ok(Value::Object(doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MessageRecord;

    #[test]
    fn blank_body_is_rejected() {
        let draft = MessageDraft::new(Some("c1".into()), "Alice", "  \n\t");
        assert_eq!(draft.validate(), Err(DraftError::EmptyBody));
        assert_eq!(draft.into_document(1), Err(DraftError::EmptyBody));
    }

    #[test]
    fn document_reads_back_as_current_user_message() {
        let draft = MessageDraft::new(Some("c1".into()), "Alice", "hello");
        let doc = draft.into_document(1234).unwrap();

        let record = MessageRecord::from_document(&doc);
        assert_eq!(record.conversation_id.as_deref(), Some("c1"));
        assert_eq!(record.sender_name, "Alice");
        assert_eq!(record.body, "hello");
        assert_eq!(record.sent_at_epoch_millis, 1234);
        assert!(record.is_from_current_user);
    }

    #[test]
    fn empty_optional_fields_are_omitted() {
        let doc = MessageDraft::new(None, "", "hey").into_document(0).unwrap();
        let fields = doc.as_object().unwrap();

        assert!(!fields.contains_key(FIELD_CHAT_ID));
        assert!(!fields.contains_key(FIELD_NAME));
        assert_eq!(fields[FIELD_MESSAGE], "hey");
    }
}
