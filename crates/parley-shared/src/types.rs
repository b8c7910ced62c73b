use serde::{Deserialize, Serialize};

use crate::constants::UNKNOWN_CONVERSATION;

/// Grouping key of a conversation.
///
/// Records without a conversation id all share the sentinel key
/// [`UNKNOWN_CONVERSATION`]. An empty string is kept as its own key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_CONVERSATION.to_string())
    }

    /// Fold an optional id into a group key.
    pub fn from_option(id: Option<&str>) -> Self {
        match id {
            Some(id) => Self::new(id),
            None => Self::unknown(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_CONVERSATION
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ConversationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
