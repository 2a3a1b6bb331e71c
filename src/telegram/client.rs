//! HTTP client for the Telegram Bot API.
//!
//! This module provides the [`TelegramClient`] struct, the production
//! [`Transport`] implementation.

use anyhow::{Context, bail};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::telegram::transport::Transport;

/// Envelope returned by every Bot API method.
///
/// ```json
/// { "ok": false, "error_code": 400, "description": "Bad Request: chat not found" }
/// ```
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// HTTP client for calling the Telegram Bot API.
///
/// # Examples
///
/// ```no_run
/// let telegram_client = TelegramClient::new("https://api.telegram.org", "123:abc");
/// telegram_client.send_message(42, "hello").await?;
/// ```
pub struct TelegramClient {
    /// Base url of the Bot API, without trailing slash
    api_url: String,
    /// Bot token given by BotFather
    token: String,
    /// HTTP client
    client: Client,
}

impl TelegramClient {
    /// Create a new [TelegramClient].
    ///
    /// # Arguments
    ///
    /// * `api_url` - The base URL of the Bot API.
    /// * `token` - The bot token.
    pub fn new(api_url: &str, token: &str) -> Self {
        let client = reqwest::Client::new();
        TelegramClient {
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            client,
        }
    }

    /// Calls a Bot API method with a JSON body.
    ///
    /// The token is part of the url, so only the method name is logged.
    async fn call(&self, method: &str, body: Value) -> Result<(), anyhow::Error> {
        let url = format!("{}/bot{}/{}", &self.api_url, &self.token, method);
        debug!("request {} with {}", method, body);

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        let api_response: ApiResponse = response
            .json()
            .await
            .with_context(|| format!("invalid response to {} ({})", method, status))?;

        debug!("response to {} -> {} {:?}", method, status, api_response);

        if !api_response.ok {
            bail!(
                "{} failed ({}): {}",
                method,
                status,
                api_response.description.unwrap_or_default()
            );
        }

        Ok(())
    }
}

#[async_trait]
impl Transport for TelegramClient {
    /// Request `sendMessage` with `{chat_id, text}`.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), anyhow::Error> {
        self.call("sendMessage", json!({ "chat_id": chat_id, "text": text }))
            .await?;
        debug!("replied to chat {}", chat_id);
        Ok(())
    }

    /// Request `setWebhook` with `{url}`.
    async fn set_webhook(&self, url: &str) -> Result<(), anyhow::Error> {
        self.call("setWebhook", json!({ "url": url })).await?;
        info!("webhook set to {}", url);
        Ok(())
    }
}
