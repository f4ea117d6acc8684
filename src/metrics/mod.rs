//! Basic metrics instrumentation.
//!
//! Counters for searches, corpus loads, mailing-list HTTP calls and signups.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector shared by the services and the mailing-list client.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    /// Queries evaluated (including ones with no results)
    search_queries_total: Arc<AtomicU64>,

    /// Persona corpora loaded
    corpus_loads_total: Arc<AtomicU64>,

    /// Mailing-list HTTP requests made
    http_requests_total: Arc<AtomicU64>,

    /// Mailing-list HTTP requests that failed
    http_errors_total: Arc<AtomicU64>,

    /// Total duration of mailing-list HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,

    /// Signups reported as successful
    signups_total: Arc<AtomicU64>,

    /// Signups reported as failed
    signup_failures_total: Arc<AtomicU64>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_search_query(&self) {
        self.search_queries_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_corpus_load(&self) {
        self.corpus_loads_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of a signup.
    pub fn record_signup(&self, success: bool) {
        if success {
            self.signups_total.fetch_add(1, Ordering::Relaxed);
        } else {
            self.signup_failures_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn search_queries_total(&self) -> u64 {
        self.search_queries_total.load(Ordering::Relaxed)
    }

    pub fn corpus_loads_total(&self) -> u64 {
        self.corpus_loads_total.load(Ordering::Relaxed)
    }

    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    pub fn http_duration_total_ms(&self) -> u64 {
        self.http_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms();
        let count = self.http_requests_total();
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    pub fn signups_total(&self) -> u64 {
        self.signups_total.load(Ordering::Relaxed)
    }

    pub fn signup_failures_total(&self) -> u64 {
        self.signup_failures_total.load(Ordering::Relaxed)
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            search_queries_total: self.search_queries_total(),
            corpus_loads_total: self.corpus_loads_total(),
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            signups_total: self.signups_total(),
            signup_failures_total: self.signup_failures_total(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub search_queries_total: u64,
    pub corpus_loads_total: u64,
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_avg_ms: f64,
    pub signups_total: u64,
    pub signup_failures_total: u64,
}

/// Helper for timing HTTP requests.
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    /// Start timing an HTTP request.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) {
        self.metrics.record_http_request(self.start.elapsed());
    }

    /// Complete the timing and record as an error.
    pub fn complete_with_error(self) {
        self.metrics.record_http_request(self.start.elapsed());
        self.metrics.record_http_error();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_metrics_start_at_zero() {
        let summary = Metrics::new().summary();
        assert_eq!(summary.search_queries_total, 0);
        assert_eq!(summary.http_requests_total, 0);
        assert_eq!(summary.http_duration_avg_ms, 0.0);
    }

    #[test]
    fn test_average_duration() {
        let metrics = Metrics::new();
        metrics.record_http_request(Duration::from_millis(100));
        metrics.record_http_request(Duration::from_millis(200));
        assert_eq!(metrics.http_requests_total(), 2);
        assert_eq!(metrics.http_duration_total_ms(), 300);
        assert_eq!(metrics.http_duration_avg_ms(), 150.0);
    }

    #[test]
    fn test_signup_outcomes() {
        let metrics = Metrics::new();
        metrics.record_signup(true);
        metrics.record_signup(true);
        metrics.record_signup(false);
        assert_eq!(metrics.signups_total(), 2);
        assert_eq!(metrics.signup_failures_total(), 1);
    }

    #[test]
    fn test_http_timer_with_error() {
        let metrics = Metrics::new();
        HttpTimer::new(metrics.clone()).complete_with_error();
        HttpTimer::new(metrics.clone()).complete();

        assert_eq!(metrics.http_requests_total(), 2);
        assert_eq!(metrics.http_errors_total(), 1);
    }

    #[test]
    fn test_clones_share_counters() {
        let metrics = Metrics::new();
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let metrics = metrics.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        metrics.record_search_query();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(metrics.search_queries_total(), 100);
    }
}
