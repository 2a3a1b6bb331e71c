//! Deserialization structures for Telegram Bot API updates.
//!
//! Only the fields the bot actually reads are modelled; everything else in the
//! update payload is ignored by serde.

use serde::Deserialize;

/// One update delivered by Telegram to the webhook.
///
/// ```json
/// {
///   "update_id": 10000,
///   "message": {
///     "message_id": 1365,
///     "chat": { "id": 1111111, "type": "private" },
///     "from": { "id": 1111111, "username": "alice" },
///     "text": "/ping"
///   }
/// }
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Update {
    /// Update identifier
    pub update_id: i64,
    /// New incoming message, absent for other update kinds (edits, callbacks, ...)
    #[serde(default)]
    pub message: Option<Message>,
}

/// A chat message.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Message identifier inside the chat
    pub message_id: i64,
    /// Chat the message belongs to
    pub chat: Chat,
    /// Sender, absent for messages sent to channels
    #[serde(default)]
    pub from: Option<User>,
    /// Text of the message, absent for stickers, photos, ...
    #[serde(default)]
    pub text: Option<String>,
}

/// A Telegram chat.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Chat {
    /// Chat identifier
    pub id: i64,
}

/// A Telegram user or bot.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct User {
    /// User identifier
    pub id: i64,
    /// Username, without the leading `@`
    #[serde(default)]
    pub username: Option<String>,
}

impl Message {
    /// Returns the text of the message, or an empty string when there is none.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Returns the identifier of the sender as a string.
    ///
    /// Messages without a sender yield an empty string.
    pub fn sender_id(&self) -> String {
        self.from
            .as_ref()
            .map(|user| user.id.to_string())
            .unwrap_or_default()
    }

    /// Returns a human readable name of the sender for logs.
    pub fn sender_name(&self) -> String {
        match &self.from {
            Some(User {
                username: Some(username),
                ..
            }) => format!("@{}", username),
            Some(user) => user.id.to_string(),
            None => "unknown".to_owned(),
        }
    }
}
