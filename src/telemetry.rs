//! Telemetry metric name constants.
//!
//! Centralised metric names for scoring runs. Consumers install their own
//! `metrics` recorder (e.g. prometheus, statsd); without a recorder
//! installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `sentimentsync_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `method`: method name (e.g. "VADER", "Gemini")
//! - `status`: "ok" or "error"

/// Total scoring calls made while building result tables.
///
/// Labels: `method`, `status` ("ok" | "error").
pub const SCORING_CALLS_TOTAL: &str = "sentimentsync_scoring_calls_total";

/// Duration of successful scoring calls in seconds.
///
/// Labels: `method`.
pub const SCORING_DURATION_SECONDS: &str = "sentimentsync_scoring_duration_seconds";

/// Methods removed from a run because setup validation failed.
///
/// Labels: `method`.
pub const METHODS_DROPPED_TOTAL: &str = "sentimentsync_methods_dropped_total";

/// Sentences scored across all runs.
pub const SENTENCES_TOTAL: &str = "sentimentsync_sentences_total";
