use async_trait::async_trait;

use crate::errors::BotError;

pub mod telegram;

/// Delivers a text message to the single configured recipient.
///
/// Implementations send exactly one message per successful call and map
/// every failure to [`BotError::Delivery`].
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<(), BotError>;
}
