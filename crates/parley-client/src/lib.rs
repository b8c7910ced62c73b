//! # parley-client
//!
//! Presentation state for the Parley screens: sign-in and sign-up, the chat
//! list, and the message thread. Rendering lives elsewhere; this crate turns
//! store snapshots into the values a screen draws and turns user input into
//! store writes.

pub mod chat_list;
pub mod error;
pub mod session;
pub mod state;
pub mod thread;
pub mod watcher;

pub use chat_list::{load_chat_list, ChatListState};
pub use error::{AuthError, ClientError};
pub use session::{AuthProvider, Landing, LoginForm, SessionFlow, SignupForm, User};
pub use state::AppState;
pub use thread::{send_message, ThreadBubble, ThreadView};
pub use watcher::{watch_chat_list, ChatListUpdate};
