use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use teloxide::types::{ChatId, Recipient};
use url::Url;

use crate::errors::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_RETRY_SECS: u64 = 600;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_LOG_FILE: &str = "homework_bot.log";
pub const DEFAULT_LOG_MAX_BYTES: u64 = 50_000_000;
pub const DEFAULT_LOG_BACKUPS: usize = 5;

const REQUIRED: [&str; 3] = ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"];

/// Immutable runtime configuration, built once at startup.
#[derive(Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    /// Fixed sleep between poll cycles. Set via RETRY_TIME (seconds). Default: 600.
    pub retry_interval: Duration,
    /// Review API URL. Set via PRACTICUM_ENDPOINT.
    pub endpoint: String,
    /// Per-request HTTP timeout. Set via REQUEST_TIMEOUT (seconds). Default: 30.
    pub request_timeout: Duration,
    /// Alternative Bot API base URL. Set via TELEGRAM_API_URL.
    pub telegram_api_url: Option<Url>,
}

impl Config {
    /// Build the config from an arbitrary variable lookup.
    /// Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<&'static str> = REQUIRED
            .iter()
            .copied()
            .filter(|key| get(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingCredentials(missing));
        }

        let telegram_api_url = match get("TELEGRAM_API_URL") {
            Some(raw) => Some(Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl {
                var: "TELEGRAM_API_URL",
                source,
            })?),
            None => None,
        };

        Ok(Config {
            practicum_token: get("PRACTICUM_TOKEN").unwrap_or_default(),
            telegram_token: get("TELEGRAM_TOKEN").unwrap_or_default(),
            telegram_chat_id: get("TELEGRAM_CHAT_ID").unwrap_or_default(),
            retry_interval: Duration::from_secs(
                get("RETRY_TIME")
                    .and_then(|v| v.trim().parse().ok())
                    .filter(|secs: &u64| *secs > 0)
                    .unwrap_or(DEFAULT_RETRY_SECS),
            ),
            endpoint: get("PRACTICUM_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.into()),
            request_timeout: Duration::from_secs(
                get("REQUEST_TIMEOUT")
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
            telegram_api_url,
        })
    }

    /// Chat destination: numeric ids address a chat directly, anything else
    /// is treated as a channel username.
    pub fn chat_recipient(&self) -> Recipient {
        match self.telegram_chat_id.trim().parse::<i64>() {
            Ok(id) => Recipient::Id(ChatId(id)),
            Err(_) => Recipient::ChannelUsername(self.telegram_chat_id.trim().to_string()),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("retry_interval", &self.retry_interval)
            .field("endpoint", &self.endpoint)
            .field("request_timeout", &self.request_timeout)
            .field("telegram_api_url", &self.telegram_api_url)
            .finish()
    }
}

/// Load `.env` (if present) and read the config from the process environment.
pub fn load() -> Result<Config, ConfigError> {
    dotenvy::dotenv().ok();
    Config::from_lookup(|key| std::env::var(key).ok())
}

/// Log sink settings. Read separately from the credentials so a missing
/// credential can still be reported through the log.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub file: PathBuf,
    pub max_bytes: u64,
    pub backups: usize,
    pub stdout: bool,
}

impl LogConfig {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        LogConfig {
            file: lookup("LOG_FILE")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            max_bytes: lookup("LOG_MAX_BYTES")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_LOG_MAX_BYTES),
            backups: lookup("LOG_BACKUPS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_LOG_BACKUPS),
            stdout: lookup("LOG_STDOUT")
                .map(|v| {
                    !matches!(
                        v.trim().to_ascii_lowercase().as_str(),
                        "0" | "false" | "no" | "off"
                    )
                })
                .unwrap_or(true),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    const CREDS: [(&str, &str); 3] = [
        ("PRACTICUM_TOKEN", "p-token"),
        ("TELEGRAM_TOKEN", "123:abc"),
        ("TELEGRAM_CHAT_ID", "42"),
    ];

    #[test]
    fn test_defaults_applied() {
        let cfg = Config::from_lookup(lookup(&CREDS)).unwrap();
        assert_eq!(cfg.retry_interval, Duration::from_secs(600));
        assert_eq!(cfg.request_timeout, Duration::from_secs(30));
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert!(cfg.telegram_api_url.is_none());
    }

    #[test]
    fn test_missing_chat_id_is_fatal() {
        let err = Config::from_lookup(lookup(&CREDS[..2])).unwrap_err();
        match err {
            ConfigError::MissingCredentials(names) => assert_eq!(names, vec!["TELEGRAM_CHAT_ID"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[
            ("PRACTICUM_TOKEN", ""),
            ("TELEGRAM_TOKEN", "123:abc"),
            ("TELEGRAM_CHAT_ID", "42"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredentials(ref n) if n == &vec!["PRACTICUM_TOKEN"]));
    }

    #[test]
    fn test_all_missing_reported_together() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredentials(ref n) if n.len() == 3));
    }

    #[test]
    fn test_retry_time_override_and_bad_value() {
        let mut pairs = CREDS.to_vec();
        pairs.push(("RETRY_TIME", "15"));
        let cfg = Config::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(cfg.retry_interval, Duration::from_secs(15));

        let mut pairs = CREDS.to_vec();
        pairs.push(("RETRY_TIME", "soon"));
        let cfg = Config::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(cfg.retry_interval, Duration::from_secs(DEFAULT_RETRY_SECS));
    }

    #[test]
    fn test_zero_retry_time_falls_back_to_default() {
        let mut pairs = CREDS.to_vec();
        pairs.push(("RETRY_TIME", "0"));
        let cfg = Config::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(cfg.retry_interval, Duration::from_secs(DEFAULT_RETRY_SECS));
    }

    #[test]
    fn test_invalid_telegram_api_url() {
        let mut pairs = CREDS.to_vec();
        pairs.push(("TELEGRAM_API_URL", "not a url"));
        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { var: "TELEGRAM_API_URL", .. }));
    }

    #[test]
    fn test_chat_recipient() {
        let cfg = Config::from_lookup(lookup(&CREDS)).unwrap();
        assert_eq!(cfg.chat_recipient(), Recipient::Id(ChatId(42)));

        let mut cfg = cfg;
        cfg.telegram_chat_id = "@reviews".into();
        assert_eq!(
            cfg.chat_recipient(),
            Recipient::ChannelUsername("@reviews".into())
        );
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let cfg = Config::from_lookup(lookup(&CREDS)).unwrap();
        let rendered = format!("{:?}", cfg);
        assert!(!rendered.contains("p-token"));
        assert!(!rendered.contains("123:abc"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_log_config_defaults_and_stdout_toggle() {
        let log = LogConfig::from_lookup(lookup(&[]));
        assert_eq!(log.file, PathBuf::from(DEFAULT_LOG_FILE));
        assert_eq!(log.max_bytes, DEFAULT_LOG_MAX_BYTES);
        assert_eq!(log.backups, DEFAULT_LOG_BACKUPS);
        assert!(log.stdout);

        let log = LogConfig::from_lookup(lookup(&[("LOG_STDOUT", "off"), ("LOG_BACKUPS", "2")]));
        assert!(!log.stdout);
        assert_eq!(log.backups, 2);
    }
}
