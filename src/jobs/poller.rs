//! Poll loop: fetch, validate, translate, notify, sleep, repeat.
//!
//! Each cycle:
//! 1. Requests statuses changed since the current window.
//! 2. Moves the window to the server's `current_date`.
//! 3. Picks the newest submission (an empty list is a quiet cycle).
//! 4. Sends its status message unless it matches the last one sent.
//! 5. On any failure, reports the error unless it matches the last one sent.
//!
//! Nothing escapes a cycle; the loop only stops when the process does.

use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::errors::BotError;
use crate::notification::Notifier;
use crate::practicum::checks::{current_date, extract_latest, parse_status};
use crate::practicum::client::PracticumClient;

/// Texts of the last successfully delivered notifications, for deduplication.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NotificationState {
    pub last_status: String,
    pub last_error: String,
}

/// What a single cycle ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new status message was delivered.
    Notified,
    /// The status message matched the last one delivered.
    Unchanged,
    /// The API reported no new statuses.
    NoUpdates,
    /// The cycle failed; `reported` is true if the error reached the chat.
    Failed { error: String, reported: bool },
}

pub struct Poller<N> {
    client: PracticumClient,
    notifier: N,
    interval: Duration,
    window: i64,
    state: NotificationState,
}

impl<N: Notifier> Poller<N> {
    pub fn new(client: PracticumClient, notifier: N, interval: Duration, window: i64) -> Self {
        Self {
            client,
            notifier,
            interval,
            window,
            state: NotificationState::default(),
        }
    }

    /// Start of the time range the next request will ask for.
    pub fn window(&self) -> i64 {
        self.window
    }

    pub fn state(&self) -> &NotificationState {
        &self.state
    }

    /// Run forever with a fixed sleep between cycles.
    pub async fn run(mut self) {
        info!(
            endpoint = %self.client.endpoint(),
            interval_secs = self.interval.as_secs(),
            window = self.window,
            "poller started"
        );
        loop {
            let outcome = self.run_cycle().await;
            debug!(?outcome, window = self.window, "cycle finished");
            tokio::time::sleep(self.interval).await;
        }
    }

    /// Execute one cycle without sleeping.
    #[tracing::instrument(skip(self), fields(window = self.window))]
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let result = match self.check_once().await {
            Ok(Some(message)) => self.notify_status(message).await,
            Ok(None) => Ok(CycleOutcome::NoUpdates),
            Err(e) => Err(e),
        };

        match result {
            Ok(outcome) => outcome,
            Err(e) => {
                let reported = self.notify_error(&e).await;
                CycleOutcome::Failed {
                    error: e.to_string(),
                    reported,
                }
            }
        }
    }

    /// Steps 1–3: fetch, advance the window, translate the newest record.
    async fn check_once(&mut self) -> Result<Option<String>, BotError> {
        let response = self.client.fetch(self.window).await?;

        match current_date(&response) {
            Some(ts) => self.window = ts,
            None => warn!(window = self.window, "response has no usable current_date, keeping window"),
        }

        let Some(homework) = extract_latest(&response)? else {
            debug!("no new statuses");
            return Ok(None);
        };

        parse_status(&homework).map(Some)
    }

    async fn notify_status(&mut self, message: String) -> Result<CycleOutcome, BotError> {
        if message == self.state.last_status {
            debug!(text = %message, "status unchanged, not resending");
            return Ok(CycleOutcome::Unchanged);
        }

        self.notifier.notify(&message).await?;
        info!(text = %message, "status change delivered");
        self.state.last_status = message;
        Ok(CycleOutcome::Notified)
    }

    /// Step 5. Never fails: a delivery failure here is only logged.
    async fn notify_error(&mut self, err: &BotError) -> bool {
        error!(error = %err, "poll cycle failed");

        let text = err.notification_text();
        if text == self.state.last_error {
            debug!("same error already reported, not resending");
            return false;
        }

        match self.notifier.notify(&text).await {
            Ok(()) => {
                self.state.last_error = text;
                true
            }
            Err(e) => {
                error!(error = %e, "could not report failure to chat");
                false
            }
        }
    }
}
