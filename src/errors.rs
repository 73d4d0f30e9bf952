use thiserror::Error;

/// Failures of a single poll cycle.
///
/// The `Display` text is what ends up in the chat when the error path
/// reports a failure, so it has to stay stable for a given failure class:
/// deduplication compares the rendered text.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("Ошибка при запросе к основному API: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Эндпоинт API недоступен, код ответа: {status}")]
    Upstream { status: u16 },

    #[error("Ошибка разбора ответа API из формата JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Некорректный ответ API: {0}")]
    Shape(String),

    #[error("Отсутствует ключ \"{0}\" в ответе API")]
    MissingField(&'static str),

    #[error("Неизвестный статус работы: {status}")]
    UnknownStatus { status: String },

    #[error("Ошибка отправки сообщения в Telegram")]
    Delivery,
}

impl BotError {
    /// Text sent to the chat when this error reaches the error path.
    pub fn notification_text(&self) -> String {
        format!("Сбой в работе программы: {}", self)
    }
}

/// Startup failures. Any of these stops the process before polling begins.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    #[error("invalid URL in {var}: {source}")]
    InvalidUrl {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_text_is_stable_per_status() {
        let a = BotError::Upstream { status: 503 }.notification_text();
        let b = BotError::Upstream { status: 503 }.notification_text();
        assert_eq!(a, b);
        assert!(a.contains("503"));
        assert!(a.starts_with("Сбой в работе программы: "));
    }

    #[test]
    fn test_delivery_text_carries_no_detail() {
        assert_eq!(
            BotError::Delivery.to_string(),
            "Ошибка отправки сообщения в Telegram"
        );
    }

    #[test]
    fn test_missing_credentials_lists_all_names() {
        let err = ConfigError::MissingCredentials(vec!["TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"]);
        assert_eq!(
            err.to_string(),
            "missing required environment variables: TELEGRAM_TOKEN, TELEGRAM_CHAT_ID"
        );
    }
}
