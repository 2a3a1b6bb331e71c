//! Outbound side of the chat platform.
//!
//! The [`Transport`] trait is what commands and the dispatcher talk to. The
//! production implementation is [`TelegramClient`](crate::telegram::TelegramClient);
//! tests use the generated `MockTransport`.

use async_trait::async_trait;
use mockall::automock;

/// Trait for sending requests to the chat platform.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
#[automock]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a plain text message to a chat.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), anyhow::Error>;
    /// Registers the URL Telegram must deliver updates to.
    async fn set_webhook(&self, url: &str) -> Result<(), anyhow::Error>;
}
