//! Decides which messages belong in the user-facing transcript.

use serde_json::Value;

use super::types::{Message, Role};

/// Metadata flag marking a `system` message as written by the user
/// (custom instructions and the like).
pub const USER_SYSTEM_MESSAGE_FLAG: &str = "is_user_system_message";

/// Whether `message` is shown to the user.
///
/// User and assistant messages are visible. System messages are visible only
/// when flagged as user-authored. Tool output, unknown roles and messages
/// without an author are hidden.
pub fn is_visible(message: &Message) -> bool {
    match message.role() {
        Some(Role::User) | Some(Role::Assistant) => true,
        Some(Role::System) => matches!(
            message.metadata.get(USER_SYSTEM_MESSAGE_FLAG),
            Some(Value::Bool(true))
        ),
        Some(Role::Tool) | Some(Role::Other(_)) | None => false,
    }
}
