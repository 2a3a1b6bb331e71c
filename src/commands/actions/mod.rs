//! Built-in commands.
//!
//! # Available Commands
//!
//! - [`HelpCommand`] - `help` / `h`, list the available commands
//! - [`PingCommand`] - `ping`, check the bot is alive
//!
//! Additional commands only need to implement [`Command`] and be added to the
//! list returned by [`builtin_commands`].

use std::sync::Arc;

use crate::commands::Command;

mod help;
mod ping;

pub use crate::commands::actions::{help::HelpCommand, ping::PingCommand};

/// Returns the commands the bot ships with, `help` last.
///
/// `help` describes every other command of the list, so it is built from it.
pub fn builtin_commands(prefix: &str) -> Vec<Arc<dyn Command>> {
    let mut commands: Vec<Arc<dyn Command>> = vec![Arc::new(PingCommand)];

    let help = HelpCommand::new(prefix, &commands);
    commands.push(Arc::new(help));

    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_commands() {
        let commands = builtin_commands("/");
        let names: Vec<&str> = commands.iter().map(|command| command.name()).collect();
        assert_eq!(names, vec!["ping", "help"]);
        assert_eq!(commands[1].aliases(), &["h"]);
    }
}
