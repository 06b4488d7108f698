//! Per-call timing of scoring collaborators.
//!
//! The recorder wraps each scoring call with a monotonic clock. Only
//! successful calls produce a [`TimingSample`]; every call, successful or
//! not, is counted in the `metrics` facade.

use std::future::Future;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::debug;

use crate::Result;
use crate::telemetry;
use crate::types::{MetricValue, Method, TimingSample};

/// Ordered log of scoring-call durations.
#[derive(Debug, Clone, Default)]
pub struct TimingRecorder {
    samples: Vec<TimingSample>,
}

impl TimingRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one scoring call, timing only the call itself.
    ///
    /// `sentence_index` is 1-based.
    pub async fn time<F, T>(&mut self, method: Method, sentence_index: usize, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let start = Instant::now();
        let result = call.await;
        let elapsed = start.elapsed();

        let status = if result.is_ok() { "ok" } else { "error" };
        metrics::counter!(telemetry::SCORING_CALLS_TOTAL,
            "method" => method.as_str(),
            "status" => status,
        )
        .increment(1);

        if result.is_ok() {
            self.record(method, sentence_index, elapsed);
        }
        result
    }

    /// Append a sample for a successful call.
    pub fn record(&mut self, method: Method, sentence_index: usize, elapsed: Duration) {
        let elapsed_seconds = elapsed.as_secs_f64();
        metrics::histogram!(telemetry::SCORING_DURATION_SECONDS,
            "method" => method.as_str(),
        )
        .record(elapsed_seconds);
        debug!(%method, sentence_index, elapsed_seconds, "scoring call finished");
        self.samples.push(TimingSample {
            method,
            sentence_index,
            elapsed_seconds,
        });
    }

    /// Samples in call order.
    pub fn samples(&self) -> &[TimingSample] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<TimingSample> {
        self.samples
    }
}

/// Timing figures for one method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodTiming {
    pub method: Method,
    pub calls: usize,
    pub total_seconds: f64,
    pub mean_seconds: f64,
}

/// Benchmark summary of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingSummary {
    /// Wall clock of the whole scoring loop, validation included.
    pub batch_seconds: f64,
    /// Mean duration of a successful scoring call.
    pub mean_call_seconds: MetricValue,
    /// Per-method figures, in declared method order.
    pub per_method: Vec<MethodTiming>,
}

impl TimingSummary {
    pub fn from_samples(samples: &[TimingSample], batch_elapsed: Duration) -> Self {
        let mean_call_seconds = if samples.is_empty() {
            MetricValue::NotAvailable
        } else {
            let total: f64 = samples.iter().map(|s| s.elapsed_seconds).sum();
            MetricValue::Value(total / samples.len() as f64)
        };

        let mut methods: Vec<Method> = samples.iter().map(|s| s.method).collect();
        methods.sort();
        methods.dedup();

        let per_method = methods
            .into_iter()
            .map(|method| {
                let durations: Vec<f64> = samples
                    .iter()
                    .filter(|s| s.method == method)
                    .map(|s| s.elapsed_seconds)
                    .collect();
                let total_seconds: f64 = durations.iter().sum();
                MethodTiming {
                    method,
                    calls: durations.len(),
                    total_seconds,
                    mean_seconds: total_seconds / durations.len() as f64,
                }
            })
            .collect();

        Self {
            batch_seconds: batch_elapsed.as_secs_f64(),
            mean_call_seconds,
            per_method,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SentimentSyncError;

    #[tokio::test]
    async fn records_only_successful_calls() {
        let mut recorder = TimingRecorder::new();
        let ok: Result<u8> = recorder.time(Method::Vader, 1, async { Ok(7) }).await;
        assert_eq!(ok.unwrap(), 7);

        let err: Result<u8> = recorder
            .time(Method::Gemini, 1, async {
                Err(SentimentSyncError::EmptyResponse)
            })
            .await;
        assert!(err.is_err());

        assert_eq!(recorder.samples().len(), 1);
        assert_eq!(recorder.samples()[0].method, Method::Vader);
        assert_eq!(recorder.samples()[0].sentence_index, 1);
        assert!(recorder.samples()[0].elapsed_seconds >= 0.0);
    }

    #[test]
    fn summary_of_no_samples() {
        let summary = TimingSummary::from_samples(&[], Duration::from_millis(5));
        assert_eq!(summary.mean_call_seconds, MetricValue::NotAvailable);
        assert!(summary.per_method.is_empty());
        assert!((summary.batch_seconds - 0.005).abs() < 1e-9);
    }

    #[test]
    fn summary_groups_by_method() {
        let samples = vec![
            TimingSample {
                method: Method::TextBlob,
                sentence_index: 1,
                elapsed_seconds: 0.2,
            },
            TimingSample {
                method: Method::Vader,
                sentence_index: 1,
                elapsed_seconds: 0.1,
            },
            TimingSample {
                method: Method::Vader,
                sentence_index: 2,
                elapsed_seconds: 0.3,
            },
        ];
        let summary = TimingSummary::from_samples(&samples, Duration::from_secs(1));
        assert!((summary.mean_call_seconds.value().unwrap() - 0.2).abs() < 1e-9);
        assert_eq!(summary.per_method.len(), 2);
        assert_eq!(summary.per_method[0].method, Method::Vader);
        assert_eq!(summary.per_method[0].calls, 2);
        assert!((summary.per_method[0].mean_seconds - 0.2).abs() < 1e-9);
    }
}
