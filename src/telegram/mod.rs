//! Telegram Bot API integration.
//!
//! This module contains everything that touches the chat platform:
//! - [`Transport`] - the outbound capability handed to commands
//! - [`TelegramClient`] - the Bot API implementation of [`Transport`]
//! - [`Update`] and [`Message`] - the inbound payload decoded by the webhook
//!
//! # Examples
//!
//! ```no_run
//! use hookbot::telegram::{TelegramClient, Transport};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = TelegramClient::new("https://api.telegram.org", "123:abc");
//! client.send_message(42, "hello").await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod transport;
mod update;

pub use crate::telegram::{
    client::TelegramClient,
    transport::Transport,
    update::{Message, Update},
};

#[cfg(test)]
pub use crate::telegram::{
    transport::MockTransport,
    update::{Chat, User},
};
