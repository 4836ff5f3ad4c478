//! Fixed-interval AI-job poller.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};
use uuid::Uuid;

use regdesk_core::config::ClientConfig;
use regdesk_core::error::AppError;
use regdesk_core::result::AppResult;
use regdesk_entity::{AiJob, AiJobStatus};

use crate::client::RegDeskClient;

/// Default poll interval.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);

/// Anything a job can be read from.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Current state of the job.
    async fn fetch_job(&self, id: Uuid) -> AppResult<AiJob>;
}

#[async_trait]
impl JobSource for RegDeskClient {
    async fn fetch_job(&self, id: Uuid) -> AppResult<AiJob> {
        self.ai_job(id).await
    }
}

/// Polls a job until it reaches a terminal status.
///
/// The interval is fixed; there is no backoff. Fetch errors end the watch.
#[derive(Debug, Clone, Copy)]
pub struct JobPoller {
    interval: Duration,
    timeout: Option<Duration>,
}

impl Default for JobPoller {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl JobPoller {
    /// Poll every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            timeout: None,
        }
    }

    /// Poller using the configured interval.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(Duration::from_millis(config.poll_interval_ms))
    }

    /// Give up after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The poll interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Poll `id` until it is terminal and return the final state.
    pub async fn wait(&self, source: &dyn JobSource, id: Uuid) -> AppResult<AiJob> {
        self.watch(source, id, |_| {}).await
    }

    /// Poll `id`, calling `on_change` whenever the status or progress
    /// message differs from the previous poll.
    pub async fn watch<F>(
        &self,
        source: &dyn JobSource,
        id: Uuid,
        mut on_change: F,
    ) -> AppResult<AiJob>
    where
        F: FnMut(&AiJob) + Send,
    {
        let deadline = self.timeout.map(|t| Instant::now() + t);
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut last: Option<(AiJobStatus, Option<String>)> = None;
        loop {
            ticker.tick().await;

            let job = source.fetch_job(id).await?;
            let seen = (job.status, job.progress_message.clone());
            if last.as_ref() != Some(&seen) {
                debug!(job_id = %id, status = %job.status, "AI job changed");
                on_change(&job);
                last = Some(seen);
            }

            if job.status.is_terminal() {
                info!(job_id = %id, status = %job.status, "AI job finished");
                return Ok(job);
            }

            if let Some(deadline) = deadline
                && Instant::now() + self.interval > deadline
            {
                return Err(AppError::external_service(format!(
                    "Timed out waiting for AI job {id}"
                )));
            }
        }
    }
}
