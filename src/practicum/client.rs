//! HTTP client for the homework review API.
//! One request per call; retrying is left to the next poll cycle.

use reqwest::StatusCode;
use serde_json::Value;

use crate::config::Config;
use crate::errors::BotError;

pub struct PracticumClient {
    client: reqwest::Client,
    endpoint: String,
    auth_header: String,
}

impl PracticumClient {
    pub fn new(cfg: &Config) -> Result<Self, BotError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(cfg.request_timeout)
            .build()
            .map_err(BotError::Network)?;

        Ok(Self {
            client,
            endpoint: cfg.endpoint.clone(),
            auth_header: format!("OAuth {}", cfg.practicum_token),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch homework statuses changed since `from_date` (unix seconds).
    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, from_date: i64) -> Result<Value, BotError> {
        tracing::debug!(endpoint = %self.endpoint, from_date, "requesting homework statuses");

        let resp = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "review API request failed");
                BotError::Network(e)
            })?;

        let status = resp.status();
        if status != StatusCode::OK {
            tracing::warn!(status = %status, "review API returned non-200");
            return Err(BotError::Upstream {
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await.map_err(BotError::Network)?;
        serde_json::from_slice(&body).map_err(|e| {
            tracing::error!(error = %e, "review API body is not valid JSON");
            BotError::Decode(e)
        })
    }
}
