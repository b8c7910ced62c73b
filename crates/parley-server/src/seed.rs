//! Sample conversations for `SEED_DEMO=true`.

use serde_json::{json, Value};

const MINUTE_MS: i64 = 60 * 1000;

/// A handful of messages across three conversations, the newest stamped at
/// `now_ms`. One message has no `chatId` and lands in the `unknown` row.
pub fn demo_documents(now_ms: i64) -> Vec<Value> {
    vec![
        json!({ "chatId": "dhea", "name": "Dhea Ayu", "message": "Are we still on for lunch?", "time": now_ms - 45 * MINUTE_MS }),
        json!({ "chatId": "dhea", "name": "Me", "message": "Yes, 12:30 works", "time": now_ms - 40 * MINUTE_MS, "isCurrentUser": true }),
        json!({ "chatId": "dhea", "name": "Dhea Ayu", "message": "See you there", "time": now_ms - 38 * MINUTE_MS }),
        json!({ "chatId": "team", "name": "Rafi", "message": "Standup moved to 10", "time": now_ms - 90 * MINUTE_MS }),
        json!({ "chatId": "team", "name": "Me", "message": "Thanks", "time": now_ms, "isCurrentUser": true }),
        json!({ "name": "Support", "message": "Welcome to Parley", "time": now_ms - 24 * 60 * MINUTE_MS }),
    ]
}
