//! Bot commands: contract, dispatch table and routing.
//!
//! This module provides the complete command processing pipeline of the bot.
//!
//! # Overview
//!
//! 1. **Contract** - Every command implements the [`Command`] trait
//! 2. **Registration** - The application root builds a [`CommandRegistry`] from
//!    an explicit list of commands and loads it once
//! 3. **Dispatch** - The [`Dispatcher`] tokenizes each message, resolves the
//!    command by name or alias, checks [`Permissions`] and runs it
//! 4. **Response** - Unknown, denied and failed commands are answered with the
//!    messages of [`responses`]
//!
//! # Architecture
//!
//! ```text
//! Telegram Message
//!      │
//!      ▼
//! ┌─────────────┐   resolve()   ┌─────────────────┐
//! │ Dispatcher  │ ────────────► │ CommandRegistry │
//! └─────────────┘               └─────────────────┘
//!      │                                 │
//!      │ is_authorized()                 │ Arc<dyn Command>
//!      ▼                                 ▼
//! ┌─────────────┐               ┌─────────────────┐
//! │ Permissions │               │ Command::execute│ ──► Transport
//! └─────────────┘               └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use hookbot::commands::{CommandRegistry, Dispatcher, Permissions, actions::builtin_commands};
//! # use hookbot::telegram::TelegramClient;
//! # async fn example(message: hookbot::telegram::Message) {
//! let registry = Arc::new(CommandRegistry::new(builtin_commands("/")));
//! registry.ensure_loaded();
//!
//! let transport = Arc::new(TelegramClient::new("https://api.telegram.org", "123:abc"));
//! let dispatcher = Dispatcher::new(registry, transport, "/", Permissions::default());
//! dispatcher.dispatch(&message).await;
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`command`] - The [`Command`] trait
//! - [`registry`] - Name and alias lookup tables
//! - [`dispatcher`] - Message routing
//! - [`permissions`] - Admin allow-list
//! - [`actions`] - Built-in commands
//! - [`responses`] - Reply formatting

pub mod actions;
mod command;
pub mod dispatcher;
mod permissions;
mod registry;
pub mod responses;

#[cfg(test)]
mod test_utils;

pub use crate::commands::{
    command::Command,
    dispatcher::{DispatchOutcome, Dispatcher},
    permissions::Permissions,
    registry::CommandRegistry,
};
