use annotate::SessionStats;
use extract::{Category, Outcome};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Per-run counters.
pub struct Metrics {
    // Outcomes
    questions: AtomicUsize,
    answered: AtomicUsize,
    unclassified: AtomicUsize,
    unanswered: AtomicUsize,

    // Indexed like `Category::ALL`
    per_category: [AtomicUsize; Category::ALL.len()],

    // Timing (in microseconds)
    total_answer_time_us: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            questions: AtomicUsize::new(0),
            answered: AtomicUsize::new(0),
            unclassified: AtomicUsize::new(0),
            unanswered: AtomicUsize::new(0),
            per_category: std::array::from_fn(|_| AtomicUsize::new(0)),
            total_answer_time_us: AtomicU64::new(0),
        }
    }

    pub fn record_answer(&self, category: Option<Category>, outcome: &Outcome, duration: Duration) {
        self.questions.fetch_add(1, Ordering::Relaxed);
        let counter = match outcome {
            Outcome::Answer(_) => &self.answered,
            Outcome::Unclassified => &self.unclassified,
            Outcome::Unanswered => &self.unanswered,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        if let Some(i) = category.and_then(|c| Category::ALL.iter().position(|k| *k == c)) {
            self.per_category[i].fetch_add(1, Ordering::Relaxed);
        }
        self.total_answer_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self, session: SessionStats) -> MetricsSnapshot {
        let questions = self.questions.load(Ordering::Relaxed);
        let per_category = Category::ALL
            .iter()
            .zip(&self.per_category)
            .map(|(c, n)| (c.label().to_string(), n.load(Ordering::Relaxed)))
            .filter(|(_, n)| *n > 0)
            .collect();

        MetricsSnapshot {
            questions,
            answered: self.answered.load(Ordering::Relaxed),
            unclassified: self.unclassified.load(Ordering::Relaxed),
            unanswered: self.unanswered.load(Ordering::Relaxed),
            per_category,
            avg_answer_time_ms: avg_time_ms(&self.total_answer_time_us, questions),
            annotation_requests: session.requests,
            annotation_failures: session.failures,
            annotation_reconnects: session.reconnects,
            annotation_exhausted: session.exhausted,
        }
    }
}

fn avg_time_ms(total_us: &AtomicU64, count: usize) -> f64 {
    let total = total_us.load(Ordering::Relaxed) as f64;
    if count > 0 {
        total / count as f64 / 1000.0 // Convert to ms
    } else {
        0.0
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub questions: usize,
    pub answered: usize,
    pub unclassified: usize,
    pub unanswered: usize,
    pub per_category: BTreeMap<String, usize>,
    pub avg_answer_time_ms: f64,
    pub annotation_requests: usize,
    pub annotation_failures: usize,
    pub annotation_reconnects: usize,
    pub annotation_exhausted: usize,
}

pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
