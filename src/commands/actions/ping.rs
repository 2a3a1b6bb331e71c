//! Ping command handler.
//!
//! Replies "Pong!" to check the bot is alive.

use async_trait::async_trait;
use log::debug;

use crate::{
    commands::{Command, responses::format_pong},
    telegram::{Message, Transport},
};

/// `ping`: replies with a pong.
pub struct PingCommand;

#[async_trait]
impl Command for PingCommand {
    fn name(&self) -> &str {
        "ping"
    }

    fn description(&self) -> &str {
        "Check bot latency"
    }

    async fn execute(
        &self,
        transport: &dyn Transport,
        message: &Message,
        _args: &[String],
    ) -> Result<(), anyhow::Error> {
        debug!("handling ping command");

        transport
            .send_message(message.chat.id, &format_pong())
            .await
    }
}
