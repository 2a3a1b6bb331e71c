//! Bot module wiring the webhook server to the command dispatcher.
//!
//! This module provides the main [`Bot`] implementation, the application root
//! of the hookbot. It builds every component once and shares them with the
//! request handlers.
//!
//! # Request Flow
//!
//! ```text
//! POST update → decode → Dispatcher → Command::execute → Transport::send_message → 200
//! ```
//!
//! # Example
//!
//! ```no_run
//! # use hookbot::bot::Bot;
//! # use hookbot::config::Config;
//! # async fn run() -> Result<(), anyhow::Error> {
//! let config = Config::load("config.yaml")?;
//!
//! let bot = Bot::new(config);
//! bot.start().await?; // Runs until Ctrl-C or SIGTERM
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use axum::Router;
use log::{info, warn};

use crate::{
    commands::{CommandRegistry, Dispatcher, Permissions, actions::builtin_commands},
    config::Config,
    server::{self, AppState},
    telegram::{TelegramClient, Transport},
};

/// Main bot structure owning the registry, the dispatcher and the transport.
///
/// # Thread Safety
///
/// Every component is wrapped in `Arc` and immutable once built, so request
/// handlers share them without locking.
pub struct Bot {
    /// Loaded configuration
    config: Config,

    /// Client for the Telegram Bot API.
    transport: Arc<dyn Transport>,

    /// Command dispatch table, loaded before the first request is served.
    registry: Arc<CommandRegistry>,

    /// Message router.
    dispatcher: Arc<Dispatcher>,
}

impl Bot {
    /// Creates a new Bot talking to the Telegram Bot API.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration loaded from file and environment
    pub fn new(config: Config) -> Self {
        let transport = Arc::new(TelegramClient::new(
            &config.telegram.api_url,
            &config.telegram.token,
        ));
        Self::with_transport(config, transport)
    }

    /// Creates a new Bot replying through `transport`.
    ///
    /// Builds the built-in commands, loads the registry and prepares the
    /// dispatcher with the owner and administrators of the configuration.
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        let registry = Arc::new(CommandRegistry::new(builtin_commands(&config.bot.prefix)));
        registry.ensure_loaded();

        let permissions = Permissions::new(
            config.bot.owner_id.as_ref().map(|id| id.0.clone()),
            config.bot.admins.iter().map(|id| id.0.clone()),
        );

        let dispatcher = Arc::new(Dispatcher::new(
            Arc::clone(&registry),
            Arc::clone(&transport),
            &config.bot.prefix,
            permissions,
        ));

        Bot {
            config,
            transport,
            registry,
            dispatcher,
        }
    }

    /// Registers the webhook if a public URL is configured.
    ///
    /// Runs once per process. A failure is logged and the server still starts,
    /// since the webhook may already be registered from a previous run.
    pub async fn register_webhook(&self) {
        let Some(url) = self.config.webhook_url() else {
            info!("no public url configured, skipping webhook registration");
            return;
        };

        if let Err(e) = self.transport.set_webhook(&url).await {
            warn!("failed to set webhook to {}: {:?}", url, e);
        }
    }

    /// Builds the HTTP router of the bot.
    pub fn router(&self) -> Router {
        server::router(
            &self.config.server.path,
            AppState {
                bot_name: Arc::from(self.config.bot.name.as_str()),
                registry: Arc::clone(&self.registry),
                dispatcher: Arc::clone(&self.dispatcher),
            },
        )
    }

    /// Registers the webhook and serves updates until shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the listen address cannot be bound or the server
    /// fails.
    pub async fn start(self) -> Result<(), anyhow::Error> {
        if self.registry.is_empty() {
            warn!("no command loaded, every command will be answered as not found");
        }

        info!(
            "{} ready with {} commands: {}",
            self.config.bot.name,
            self.registry.len(),
            self.registry.command_names().join(", ")
        );

        self.register_webhook().await;

        server::serve(self.config.server.listen, self.router()).await
    }
}
