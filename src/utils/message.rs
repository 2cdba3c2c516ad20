//! Utility functions for creating and reading A2A Message objects.

use crate::types::{Message, Part, Role};
use crate::utils::parts::concat_text_parts;
use uuid::Uuid;

/// Creates a new user message containing a single text Part.
///
/// The message id is a fresh UUID v4, so two calls never share an id.
///
/// # Example
///
/// ```
/// use a2a_weather::types::Role;
/// use a2a_weather::utils::new_user_text_message;
///
/// let message = new_user_text_message("What's the weather in Oslo?");
/// assert_eq!(message.role, Role::User);
/// assert_eq!(message.parts.len(), 1);
/// ```
pub fn new_user_text_message(text: impl Into<String>) -> Message {
    Message {
        message_id: Uuid::new_v4().to_string(),
        role: Role::User,
        kind: "message".to_string(),
        parts: vec![Part::text(text)],
        context_id: None,
        task_id: None,
        metadata: None,
    }
}

/// Returns the text of a message: all text parts joined with no separator.
///
/// # Example
///
/// ```
/// use a2a_weather::utils::{message_text, new_user_text_message};
///
/// let message = new_user_text_message("Hello");
/// assert_eq!(message_text(&message), "Hello");
/// ```
pub fn message_text(message: &Message) -> String {
    concat_text_parts(&message.parts)
}
