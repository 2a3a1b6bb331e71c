//! Configuration file structures for the hookbot.
//!
//! The configuration is read from a YAML file and can be overridden by
//! environment variables prefixed with `HOOKBOT_`, nested keys being separated
//! by `__` (e.g. `HOOKBOT_TELEGRAM__TOKEN`). A missing file is not an error:
//! the whole configuration may come from the environment.
//!
//! # Configuration File Format
//!
//! ```yaml
//! telegram:
//!   # Bot token given by BotFather
//!   token: "123456:ABC-DEF"
//!   # Base URL of the Bot API
//!   api_url: "https://api.telegram.org"
//!
//! bot:
//!   # Name reported by the status endpoint
//!   name: "TelegramBot"
//!   # Prefix every command starts with
//!   prefix: "/"
//!   # Telegram user id of the owner
//!   owner_id: 11111111
//!   # Telegram user ids of the administrators
//!   admins: [22222222, "33333333"]
//!
//! server:
//!   # Address the webhook server listens on
//!   listen: "0.0.0.0:3000"
//!   # Path Telegram posts updates to
//!   path: "/api/index"
//!   # Public base URL, the webhook is registered when set
//!   public_url: "https://bot.example.com"
//! ```

use std::net::SocketAddr;

use anyhow::{Context, bail};
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

/// Root configuration structure for the hookbot.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Telegram Bot API configuration
    pub telegram: Telegram,
    /// Command handling configuration
    #[serde(default)]
    pub bot: BotSettings,
    /// Webhook server configuration
    #[serde(default)]
    pub server: Server,
}

/// Telegram Bot API configuration.
///
/// ```yaml
/// telegram:
///   token: "123456:ABC-DEF"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Telegram {
    /// Bot token. Required, the bot cannot reply without it.
    pub token: String,

    /// Base URL of the Bot API.
    ///
    /// Only useful to target a local Bot API server.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

/// Command handling configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BotSettings {
    /// Name reported by the status endpoint
    pub name: String,
    /// Prefix of the commands
    pub prefix: String,
    /// Owner, allowed to run admin-only commands
    pub owner_id: Option<UserId>,
    /// Administrators, allowed to run admin-only commands
    pub admins: Vec<UserId>,
}

/// Webhook server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Server {
    /// Socket address to bind
    pub listen: SocketAddr,
    /// Path of the webhook endpoint, starting with `/`
    pub path: String,
    /// Public base URL of the server.
    ///
    /// When set, `public_url + path` is registered as the webhook at start-up.
    pub public_url: Option<String>,
}

/// A Telegram user identifier, written as a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "RawUserId")]
pub struct UserId(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawUserId {
    Number(i64),
    Text(String),
}

impl From<RawUserId> for UserId {
    fn from(raw: RawUserId) -> Self {
        match raw {
            RawUserId::Number(id) => UserId(id.to_string()),
            RawUserId::Text(id) => UserId(id.trim().to_owned()),
        }
    }
}

fn default_api_url() -> String {
    "https://api.telegram.org".to_owned()
}

impl Default for BotSettings {
    fn default() -> Self {
        BotSettings {
            name: "TelegramBot".to_owned(),
            prefix: "/".to_owned(),
            owner_id: None,
            admins: vec![],
        }
    }
}

impl Default for Server {
    fn default() -> Self {
        Server {
            listen: SocketAddr::from(([0, 0, 0, 0], 3000)),
            path: "/api/index".to_owned(),
            public_url: None,
        }
    }
}

impl Config {
    /// Loads the configuration from a YAML file and `HOOKBOT_` environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or the environment cannot be parsed, if the
    /// token or the prefix is empty, or if the webhook path does not start
    /// with `/`.
    pub fn load(path: &str) -> Result<Self, anyhow::Error> {
        let config: Config = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("HOOKBOT_").split("__"))
            .extract()
            .with_context(|| format!("invalid configuration in {}", path))?;

        config.normalize().validate()
    }

    /// Trims the values where surrounding noise is never meaningful.
    fn normalize(mut self) -> Self {
        self.telegram.token = self.telegram.token.trim().to_owned();
        self.telegram.api_url = self.telegram.api_url.trim_end_matches('/').to_owned();
        self.server.public_url = self
            .server
            .public_url
            .map(|url| url.trim_end_matches('/').to_owned())
            .filter(|url| !url.is_empty());
        self
    }

    fn validate(self) -> Result<Self, anyhow::Error> {
        if self.telegram.token.is_empty() {
            bail!("telegram token is missing");
        }
        if self.bot.prefix.is_empty() {
            bail!("command prefix cannot be empty");
        }
        if !self.server.path.starts_with('/') {
            bail!("webhook path must start with '/': {}", self.server.path);
        }
        Ok(self)
    }

    /// URL Telegram must post updates to, if a public URL is configured.
    pub fn webhook_url(&self) -> Option<String> {
        self.server
            .public_url
            .as_ref()
            .map(|url| format!("{}{}", url, self.server.path))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serial_test::serial;
    use tempfile::NamedTempFile;

    use super::*;

    const ENV_KEYS: &[&str] = &[
        "HOOKBOT_TELEGRAM__TOKEN",
        "HOOKBOT_BOT__PREFIX",
        "HOOKBOT_BOT__OWNER_ID",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            // SAFETY: tests touching the environment are serialized
            unsafe { std::env::remove_var(key) };
        }
    }

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn path_of(file: &NamedTempFile) -> String {
        file.path().to_str().unwrap().to_owned()
    }

    #[test]
    #[serial]
    fn test_load_full_config() {
        clear_env();
        let file = write_config(
            r#"
telegram:
  token: " 123:abc "
  api_url: "http://localhost:8081/"
bot:
  name: "Hooky"
  prefix: "!"
  owner_id: 11111111
  admins: [22222222, "33333333"]
server:
  listen: "127.0.0.1:8080"
  path: "/webhook"
  public_url: "https://bot.example.com/"
"#,
        );

        let config = Config::load(&path_of(&file)).unwrap();

        assert_eq!(config.telegram.token, "123:abc");
        assert_eq!(config.telegram.api_url, "http://localhost:8081");
        assert_eq!(config.bot.name, "Hooky");
        assert_eq!(config.bot.prefix, "!");
        assert_eq!(config.bot.owner_id, Some(UserId("11111111".to_owned())));
        assert_eq!(
            config.bot.admins,
            vec![UserId("22222222".to_owned()), UserId("33333333".to_owned())]
        );
        assert_eq!(config.server.listen, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(
            config.webhook_url(),
            Some("https://bot.example.com/webhook".to_owned())
        );
    }

    #[test]
    #[serial]
    fn test_load_defaults() {
        clear_env();
        let file = write_config("telegram:\n  token: \"123:abc\"\n");

        let config = Config::load(&path_of(&file)).unwrap();

        assert_eq!(config.telegram.api_url, "https://api.telegram.org");
        assert_eq!(config.bot.name, "TelegramBot");
        assert_eq!(config.bot.prefix, "/");
        assert_eq!(config.bot.owner_id, None);
        assert!(config.bot.admins.is_empty());
        assert_eq!(config.server.listen, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.server.path, "/api/index");
        assert_eq!(config.webhook_url(), None);
    }

    #[test]
    #[serial]
    fn test_load_missing_token() {
        clear_env();
        let file = write_config("bot:\n  prefix: \"/\"\n");

        assert!(Config::load(&path_of(&file)).is_err());
    }

    #[test]
    #[serial]
    fn test_load_empty_token() {
        clear_env();
        let file = write_config("telegram:\n  token: \"  \"\n");

        let error = Config::load(&path_of(&file)).unwrap_err();
        assert!(error.to_string().contains("token is missing"));
    }

    #[test]
    #[serial]
    fn test_load_empty_prefix() {
        clear_env();
        let file = write_config("telegram:\n  token: \"123:abc\"\nbot:\n  prefix: \"\"\n");

        let error = Config::load(&path_of(&file)).unwrap_err();
        assert!(error.to_string().contains("prefix"));
    }

    #[test]
    #[serial]
    fn test_load_invalid_path() {
        clear_env();
        let file = write_config("telegram:\n  token: \"123:abc\"\nserver:\n  path: \"api\"\n");

        let error = Config::load(&path_of(&file)).unwrap_err();
        assert!(error.to_string().contains("must start with '/'"));
    }

    #[test]
    #[serial]
    fn test_load_environment_overrides() {
        clear_env();
        let file = write_config("telegram:\n  token: \"from-file\"\nbot:\n  prefix: \"/\"\n");

        // SAFETY: tests touching the environment are serialized
        unsafe {
            std::env::set_var("HOOKBOT_TELEGRAM__TOKEN", "from-env");
            std::env::set_var("HOOKBOT_BOT__PREFIX", "!");
            std::env::set_var("HOOKBOT_BOT__OWNER_ID", "42");
        }
        let config = Config::load(&path_of(&file));
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.telegram.token, "from-env");
        assert_eq!(config.bot.prefix, "!");
        assert_eq!(config.bot.owner_id, Some(UserId("42".to_owned())));
    }

    #[test]
    #[serial]
    fn test_load_environment_only() {
        clear_env();
        // SAFETY: tests touching the environment are serialized
        unsafe { std::env::set_var("HOOKBOT_TELEGRAM__TOKEN", "from-env") };
        let config = Config::load("/nonexistent/hookbot.yaml");
        clear_env();

        assert_eq!(config.unwrap().telegram.token, "from-env");
    }
}
