//! Routing of inbound messages to commands.
//!
//! The [`Dispatcher`] turns one message into zero or one command invocation:
//!
//! ```text
//! Message → filter prefix → tokenize → resolve → authorize → execute
//!              │                          │           │          │
//!           Ignored                   NotFound     Denied     Executed / Failed
//! ```
//!
//! Every branch except `Ignored` and `Executed` sends exactly one reply to the
//! originating chat. Command failures never leave the dispatcher.

use std::{any::Any, panic::AssertUnwindSafe, sync::Arc};

use futures::FutureExt;
use log::{debug, error, info, warn};

use crate::{
    commands::{
        CommandRegistry, Permissions,
        responses::{format_execution_error, format_not_found, format_permission_denied},
    },
    telegram::{Message, Transport},
};

/// Branch taken by [`Dispatcher::dispatch`] for one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The text does not start with the prefix
    Ignored,
    /// No command matches the token
    NotFound(String),
    /// The caller may not run the admin-only command
    Denied(String),
    /// The command ran successfully
    Executed(String),
    /// The command returned an error
    Failed(String),
}

/// Splits a message text into a lowercase command token and its arguments.
///
/// Returns `None` when the text does not start with `prefix`. The token is
/// empty when whitespace or nothing follows the prefix.
///
/// # Examples
///
/// ```
/// # use hookbot::commands::dispatcher::tokenize;
/// let (token, args) = tokenize("/Ban  user123 spam", "/").unwrap();
/// assert_eq!(token, "ban");
/// assert_eq!(args, vec!["user123", "spam"]);
/// ```
pub fn tokenize(text: &str, prefix: &str) -> Option<(String, Vec<String>)> {
    let rest = text.trim().strip_prefix(prefix)?;
    let (token, remainder) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let args = remainder.split_whitespace().map(str::to_owned).collect();

    Some((token.to_lowercase(), args))
}

/// Routes messages to the commands of a [`CommandRegistry`].
pub struct Dispatcher {
    /// Loaded commands
    registry: Arc<CommandRegistry>,
    /// Client handed to commands and used for the dispatcher's own replies
    transport: Arc<dyn Transport>,
    /// Command prefix, e.g. `/`
    prefix: String,
    /// Owner and administrators
    permissions: Permissions,
}

impl Dispatcher {
    /// Creates a new [`Dispatcher`].
    ///
    /// # Arguments
    ///
    /// * `registry` - The command registry, loaded or not
    /// * `transport` - Client used to reply
    /// * `prefix` - Command prefix
    /// * `permissions` - Identifiers allowed to run admin-only commands
    pub fn new(
        registry: Arc<CommandRegistry>,
        transport: Arc<dyn Transport>,
        prefix: &str,
        permissions: Permissions,
    ) -> Self {
        Dispatcher {
            registry,
            transport,
            prefix: prefix.to_owned(),
            permissions,
        }
    }

    /// Dispatches one message.
    ///
    /// Resolves the command named after the prefix, checks the caller may run
    /// it, and awaits its execution. Replies to the chat when the command is
    /// unknown, denied or failed.
    pub async fn dispatch(&self, message: &Message) -> DispatchOutcome {
        let Some((token, args)) = tokenize(message.text(), &self.prefix) else {
            return DispatchOutcome::Ignored;
        };

        debug!(
            "message {} in chat {}: command {:?} args {:?}",
            message.message_id, message.chat.id, token, args
        );

        let Some(command) = self.registry.resolve(&token) else {
            debug!("command {:?} not found", token);
            self.reply(message, &format_not_found(&token, &self.prefix))
                .await;
            return DispatchOutcome::NotFound(token);
        };

        let name = command.name().to_owned();
        let caller_id = message.sender_id();

        if !self.permissions.is_authorized(command.as_ref(), &caller_id) {
            warn!("{} is not allowed to run {}", message.sender_name(), name);
            self.reply(message, &format_permission_denied()).await;
            return DispatchOutcome::Denied(name);
        }

        info!("executing command {} by {}", name, message.sender_name());

        let result = AssertUnwindSafe(command.execute(self.transport.as_ref(), message, &args))
            .catch_unwind()
            .await;

        match result {
            Ok(Ok(())) => DispatchOutcome::Executed(name),
            Ok(Err(e)) => {
                error!("error executing {}: {:?}", name, e);
                self.reply(message, &format_execution_error(&name)).await;
                DispatchOutcome::Failed(name)
            }
            Err(panic) => {
                error!("command {} panicked: {}", name, panic_message(&*panic));
                self.reply(message, &format_execution_error(&name)).await;
                DispatchOutcome::Failed(name)
            }
        }
    }

    /// Sends a reply to the chat of `message`, logging failures.
    async fn reply(&self, message: &Message, text: &str) {
        if let Err(e) = self.transport.send_message(message.chat.id, text).await {
            warn!("failed to reply to chat {}: {:?}", message.chat.id, e);
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
