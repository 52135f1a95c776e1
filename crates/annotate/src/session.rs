use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{sleep, timeout};
use tracing::{info, warn};

use crate::schema::Sentence;

/// A linguistic annotation backend.
#[async_trait]
pub trait Annotator: Send {
    /// Annotate `text`, returning its sentences in order.
    async fn annotate(&mut self, text: &str) -> Result<Vec<Sentence>>;

    /// Tear down and re-establish the connection to the backend.
    async fn reconnect(&mut self) -> Result<()>;
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnnotationError {
    #[error("annotation timed out after {0:?}")]
    Timeout(Duration),
    #[error("annotation service returned no sentences")]
    Empty,
    #[error("annotation service failed: {0}")]
    Service(String),
    #[error("annotation failed after {attempts} attempts: {last}")]
    Exhausted { attempts: usize, last: String },
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: usize,
    reconnect_after: usize,
    deadline: Duration,
    initial_backoff: Duration,
    max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(10, 5, Duration::from_secs(10))
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, reconnect_after: usize, deadline: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            reconnect_after,
            deadline,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
        }
    }

    /// Wait between attempts, doubling up to `max_backoff_ms`.
    pub fn with_backoff(mut self, initial_backoff_ms: u64, max_backoff_ms: u64) -> Self {
        self.initial_backoff = Duration::from_millis(initial_backoff_ms);
        self.max_backoff = Duration::from_millis(max_backoff_ms);
        self
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    fn should_reconnect(&self, failures: usize) -> bool {
        self.reconnect_after > 0 && failures % self.reconnect_after == 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub requests: usize,
    pub failures: usize,
    pub reconnects: usize,
    pub exhausted: usize,
}

/// The long-lived, exclusively owned connection to the annotation service.
pub struct AnnotationSession {
    annotator: Box<dyn Annotator>,
    policy: RetryPolicy,
    stats: SessionStats,
}

impl AnnotationSession {
    pub fn new(annotator: Box<dyn Annotator>, policy: RetryPolicy) -> Self {
        Self {
            annotator,
            policy,
            stats: SessionStats::default(),
        }
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub async fn reconnect(&mut self) -> Result<()> {
        self.stats.reconnects += 1;
        self.annotator.reconnect().await
    }

    /// Annotate `text`, each attempt bounded by the policy deadline.
    ///
    /// Timeouts, service errors and empty results are retried up to
    /// `max_attempts` in total; every `reconnect_after` consecutive failures
    /// the session is re-established before the next attempt.
    pub async fn parse(&mut self, text: &str) -> Result<Vec<Sentence>, AnnotationError> {
        let mut failures = 0;
        let mut backoff = self.policy.initial_backoff;

        loop {
            self.stats.requests += 1;
            let error = match timeout(self.policy.deadline, self.annotator.annotate(text)).await {
                Ok(Ok(sentences)) if !sentences.is_empty() => {
                    if failures > 0 {
                        info!(
                            attempts = failures + 1,
                            "Annotation succeeded after retries"
                        );
                    }
                    return Ok(sentences);
                }
                Ok(Ok(_)) => AnnotationError::Empty,
                Ok(Err(e)) => AnnotationError::Service(format!("{:#}", e)),
                Err(_) => AnnotationError::Timeout(self.policy.deadline),
            };

            failures += 1;
            self.stats.failures += 1;

            if failures >= self.policy.max_attempts {
                self.stats.exhausted += 1;
                warn!(
                    attempts = failures,
                    error = %error,
                    "Annotation failed after max attempts"
                );
                return Err(AnnotationError::Exhausted {
                    attempts: failures,
                    last: error.to_string(),
                });
            }

            warn!(
                attempt = failures,
                max_attempts = self.policy.max_attempts,
                error = %error,
                "Annotation failed, retrying"
            );

            if self.policy.should_reconnect(failures) {
                info!(failures, "Resetting annotation session");
                if let Err(e) = self.reconnect().await {
                    warn!(error = %e, "Reconnect failed");
                }
            }

            if !backoff.is_zero() {
                sleep(backoff).await;
                backoff = std::cmp::min(backoff * 2, self.policy.max_backoff);
            }
        }
    }

    /// First sentence of the annotation of `text`.
    pub async fn parse_sentence(&mut self, text: &str) -> Result<Sentence, AnnotationError> {
        let mut sentences = self.parse(text).await?;
        Ok(sentences.swap_remove(0))
    }
}
