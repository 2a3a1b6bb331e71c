//! Help command handler.
//!
//! Lists every command of the bot with its aliases and description.
//!
//! The list is computed once when the command is built, from the same command
//! list the registry is populated with.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::{
    commands::{
        Command,
        responses::{HelpEntry, format_help},
    },
    telegram::{Message, Transport},
};

const HELP_NAME: &str = "help";
const HELP_ALIASES: &[&str] = &["h"];
const HELP_DESCRIPTION: &str = "Show all available commands";

/// `help` (alias `h`): lists the available commands.
pub struct HelpCommand {
    /// Pre-rendered help message
    response: String,
}

impl HelpCommand {
    /// Builds the help command for `commands` plus itself.
    ///
    /// Entries are sorted by name; commands without a name are left out.
    pub fn new(prefix: &str, commands: &[Arc<dyn Command>]) -> Self {
        let mut entries: Vec<HelpEntry> = commands
            .iter()
            .filter(|command| !command.name().trim().is_empty())
            .map(|command| HelpEntry {
                name: command.name().trim().to_lowercase(),
                aliases: command
                    .aliases()
                    .iter()
                    .map(|alias| alias.trim().to_lowercase())
                    .filter(|alias| !alias.is_empty())
                    .collect(),
                description: command.description().to_owned(),
                admin_only: command.admin_only(),
            })
            .collect();

        entries.push(HelpEntry {
            name: HELP_NAME.to_owned(),
            aliases: HELP_ALIASES.iter().map(|a| a.to_string()).collect(),
            description: HELP_DESCRIPTION.to_owned(),
            admin_only: false,
        });
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        HelpCommand {
            response: format_help(prefix, &entries),
        }
    }
}

#[async_trait]
impl Command for HelpCommand {
    fn name(&self) -> &str {
        HELP_NAME
    }

    fn aliases(&self) -> &[&str] {
        HELP_ALIASES
    }

    fn description(&self) -> &str {
        HELP_DESCRIPTION
    }

    async fn execute(
        &self,
        transport: &dyn Transport,
        message: &Message,
        _args: &[String],
    ) -> Result<(), anyhow::Error> {
        debug!("handling help command");

        transport.send_message(message.chat.id, &self.response).await
    }
}
