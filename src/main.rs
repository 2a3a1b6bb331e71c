//! Hookbot - A webhook-driven Telegram bot.
//!
//! This is the main entry point of the hookbot, which receives Telegram updates
//! over HTTP and routes the commands they carry to their handlers.
//!
//! # Overview
//!
//! Telegram posts every update to the webhook path. Messages starting with the
//! command prefix are tokenized, the command is looked up by name or alias,
//! admin-only commands are checked against the owner and administrators, then
//! the command runs and replies through the Bot API.
//!
//! # Configuration
//!
//! Create a `config.yaml` file with your settings:
//!
//! ```yaml
//! telegram:
//!   token: "123456:ABC-DEF"
//!
//! bot:
//!   prefix: "/"
//!   owner_id: 11111111
//!
//! server:
//!   listen: "0.0.0.0:3000"
//!   public_url: "https://bot.example.com"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Override any configuration value using environment variables with the `HOOKBOT_` prefix:
//!
//! ```bash
//! export HOOKBOT_TELEGRAM__TOKEN="123456:ABC-DEF"
//! export HOOKBOT_BOT__OWNER_ID="11111111"
//! ```
//!
//! # Usage
//!
//! ```bash
//! hookbot --config config.yaml
//! ```
//!
//! # Bot Commands
//!
//! - `/help` (`/h`) - List the available commands
//! - `/ping` - Check the bot is alive
//!
//! # Architecture
//!
//! - [`bot`] - Application root wiring every component
//! - [`commands`] - Command contract, registry, dispatcher and built-in commands
//! - [`config`] - YAML configuration with environment variable support
//! - [`server`] - Webhook HTTP server
//! - [`telegram`] - Bot API client and update structures
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)

use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{bot::Bot, config::Config};

mod bot;
mod commands;
mod config;
mod server;
mod telegram;

/// Command-line arguments for the hookbot.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// The file may be missing if the whole configuration is given through
    /// `HOOKBOT_` environment variables.
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

/// Main entry point for the hookbot.
///
/// 1. **Logging Setup**: `info` level by default, overridable with `RUST_LOG`
/// 2. **Argument Parsing**: Parses command-line arguments using `clap`
/// 3. **Configuration Loading**: Reads the YAML file and the environment; a
///    missing token is fatal
/// 4. **Bot Execution**: Loads the commands, registers the webhook and serves
///    updates until Ctrl-C or SIGTERM
#[tokio::main]
async fn main() -> ExitCode {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting hookbot {}...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let bot = Bot::new(config);
    if let Err(e) = bot.start().await {
        error!("Bot stopped with error: {:#}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
