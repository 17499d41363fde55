//! Messaging credentials, loaded from the process environment.

use crate::ConfigError;

pub const BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Opaque credentials for the messaging channel. Loaded once at startup;
/// either variable missing or empty aborts the run before any network
/// activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bot_token: String,
    pub chat_id: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var(BOT_TOKEN_VAR).ok(),
            std::env::var(CHAT_ID_VAR).ok(),
        )
    }

    fn from_vars(
        bot_token: Option<String>,
        chat_id: Option<String>,
    ) -> Result<Self, ConfigError> {
        let bot_token = require(bot_token, BOT_TOKEN_VAR)?;
        let chat_id = require(chat_id, CHAT_ID_VAR)?;
        Ok(Self { bot_token, chat_id })
    }
}

fn require(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingCredential { name }),
    }
}
