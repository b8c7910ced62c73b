/// Name of the hosted collection holding chat messages
pub const CHATS_COLLECTION: &str = "chats";

/// Document field names in the `chats` collection
pub const FIELD_CHAT_ID: &str = "chatId";
pub const FIELD_NAME: &str = "name";
pub const FIELD_MESSAGE: &str = "message";
pub const FIELD_TIME: &str = "time";
pub const FIELD_IS_CURRENT_USER: &str = "isCurrentUser";

/// Group key for records that carry no conversation id
pub const UNKNOWN_CONVERSATION: &str = "unknown";

/// Shown in place of an empty sender name
pub const PLACEHOLDER_DISPLAY_NAME: &str = "Unknown";

/// Shown in place of an empty message body
pub const PLACEHOLDER_PREVIEW: &str = "No messages yet";

/// Shown when a timestamp cannot be rendered
pub const PLACEHOLDER_TIME: &str = "--:--";

/// Chat list text when there are no conversations at all
pub const EMPTY_CHAT_LIST: &str = "No chats available";

/// 12-hour wall clock with AM/PM marker, e.g. `03:07 PM`
pub const CLOCK_FORMAT: &str = "%I:%M %p";
