//! The command plugin contract.
//!
//! Every command the bot can run is a value implementing [`Command`]. The
//! application root builds a list of them and hands it to the
//! [`CommandRegistry`](crate::commands::CommandRegistry).

use async_trait::async_trait;

use crate::telegram::{Message, Transport};

/// A named, invocable unit of bot functionality.
///
/// Only [`Command::name`] and [`Command::execute`] are required. Names and
/// aliases are matched case-insensitively by the registry.
///
/// # Examples
///
/// ```no_run
/// use async_trait::async_trait;
/// use hookbot::commands::Command;
/// use hookbot::telegram::{Message, Transport};
///
/// struct Echo;
///
/// #[async_trait]
/// impl Command for Echo {
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     async fn execute(
///         &self,
///         transport: &dyn Transport,
///         message: &Message,
///         args: &[String],
///     ) -> Result<(), anyhow::Error> {
///         transport.send_message(message.chat.id, &args.join(" ")).await
///     }
/// }
/// ```
#[async_trait]
pub trait Command: Send + Sync {
    /// Canonical name, the token typed after the prefix.
    fn name(&self) -> &str;

    /// Alternative tokens resolving to this command.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// Restricts the command to the owner and the administrators.
    fn admin_only(&self) -> bool {
        false
    }

    /// One line shown by the `help` command.
    fn description(&self) -> &str {
        ""
    }

    /// Runs the command.
    ///
    /// # Arguments
    ///
    /// * `transport` - Client used to reply
    /// * `message` - The message that triggered the command
    /// * `args` - Whitespace separated tokens following the command name
    ///
    /// # Errors
    ///
    /// Any error is caught by the dispatcher, which answers with a generic
    /// error message.
    async fn execute(
        &self,
        transport: &dyn Transport,
        message: &Message,
        args: &[String],
    ) -> Result<(), anyhow::Error>;
}
