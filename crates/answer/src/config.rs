use annotate::RetryPolicy;
use annotate::corenlp::DEFAULT_ANNOTATORS;
use anyhow::{Context, Result};
use query::Bm25;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Run configuration. Every section falls back to its defaults, so a config
/// file only needs the keys it changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub annotation: AnnotationConfig,
    pub retry: RetryConfig,
    pub candidates: CandidateConfig,
    pub ranking: RankingConfig,
    pub entities: EntityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    pub url: String,
    pub annotators: String,
    /// Deadline for one annotation request.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: usize,
    pub reconnect_after: usize,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateConfig {
    pub window: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub k1: f64,
    pub b: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityConfig {
    pub enabled: bool,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9000".to_string(),
            annotators: DEFAULT_ANNOTATORS.to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            reconnect_after: 5,
            initial_backoff_ms: 0,
            max_backoff_ms: 0,
        }
    }
}

impl Default for CandidateConfig {
    fn default() -> Self {
        Self {
            window: query::finder::DEFAULT_WINDOW,
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        let bm25 = Bm25::default();
        Self { k1: bm25.k1, b: bm25.b }
    }
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl AppConfig {
    pub async fn from_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        serde_json::from_str(&content).with_context(|| format!("Invalid config: {:?}", path))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry.max_attempts,
            self.retry.reconnect_after,
            Duration::from_secs(self.annotation.timeout_secs),
        )
        .with_backoff(self.retry.initial_backoff_ms, self.retry.max_backoff_ms)
    }

    pub fn ranker(&self) -> Bm25 {
        Bm25::new(self.ranking.k1, self.ranking.b)
    }
}
