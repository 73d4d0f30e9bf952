use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::Recipient;
use tracing::{debug, info, warn};

use super::Notifier;
use crate::config::Config;
use crate::errors::BotError;

/// Sends notifications to one Telegram chat through the Bot API.
#[derive(Clone)]
pub struct TelegramNotifier {
    bot: Bot,
    chat: Recipient,
}

impl TelegramNotifier {
    pub fn new(cfg: &Config) -> Self {
        let mut bot = Bot::new(&cfg.telegram_token);
        if let Some(url) = &cfg.telegram_api_url {
            debug!(api_url = %url, "using custom Telegram Bot API URL");
            bot = bot.set_api_url(url.clone());
        }

        Self {
            bot,
            chat: cfg.chat_recipient(),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<(), BotError> {
        info!(chat = ?self.chat, text = message, "sending Telegram message");

        match self
            .bot
            .send_message(self.chat.clone(), message.to_string())
            .await
        {
            Ok(_) => {
                info!(chat = ?self.chat, "Telegram message delivered");
                Ok(())
            }
            Err(e) => {
                // Only the fact of failure is reported upward.
                warn!(chat = ?self.chat, error = %e, "Telegram delivery failed");
                Err(BotError::Delivery)
            }
        }
    }
}
