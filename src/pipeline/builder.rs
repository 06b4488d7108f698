//! Result table builder.
//!
//! Runs every participating scorer over every sentence and assembles the
//! [`ResultTable`].
//!
//! # Run flow
//!
//! ```text
//! sentences, methods
//!        │ reject empty input (Validation)
//!        ▼
//! validate each scorer once ──► failure: drop method, record diagnostic
//!        │
//!        ▼
//! for each sentence (input order)
//!   for each method (declared order)
//!     score ──► ok: cell + TimingSample
//!           └─► error: ERROR cell, diagnostic, keep going
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, instrument, warn};

use super::timing::TimingRecorder;
use crate::scoring::ScorerRegistry;
use crate::telemetry;
use crate::types::{Method, MethodOutput, ResultTable, SentenceRecord, TimingSample};
use crate::{Result, SentimentSyncError};

/// Something the caller should be told about a run that still completed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The method failed setup and took no part in the run.
    MethodDropped { method: Method, reason: String },
    /// One scoring call failed; that cell holds the ERROR marker.
    CallFailed {
        method: Method,
        /// 1-based.
        sentence_index: usize,
        reason: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MethodDropped { method, reason } => {
                write!(f, "{method} setup error: {reason}")
            }
            Diagnostic::CallFailed {
                method,
                sentence_index,
                reason,
            } => write!(
                f,
                "Error during {method} analysis on sentence #{sentence_index}: {reason}"
            ),
        }
    }
}

/// Everything produced by one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub table: ResultTable,
    /// One sample per successful call, in call order.
    pub timings: Vec<TimingSample>,
    pub diagnostics: Vec<Diagnostic>,
    #[serde(serialize_with = "serialize_seconds")]
    pub batch_elapsed: Duration,
}

impl RunOutcome {
    /// Methods removed from the run during setup.
    pub fn dropped_methods(&self) -> Vec<Method> {
        self.diagnostics
            .iter()
            .filter_map(|d| match d {
                Diagnostic::MethodDropped { method, .. } => Some(*method),
                _ => None,
            })
            .collect()
    }
}

fn serialize_seconds<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Builds result tables from a scorer registry.
pub struct TableBuilder<'a> {
    registry: &'a ScorerRegistry,
}

impl<'a> TableBuilder<'a> {
    pub fn new(registry: &'a ScorerRegistry) -> Self {
        Self { registry }
    }

    /// Score `sentences` with `methods` and assemble the table.
    ///
    /// Fails only on invalid input. Setup failures drop the method;
    /// per-sentence failures leave an ERROR cell.
    #[instrument(skip_all, fields(sentences = sentences.len(), methods = ?methods))]
    pub async fn build(&self, sentences: &[String], methods: &[Method]) -> Result<RunOutcome> {
        validate_input(sentences, methods)?;

        let batch_start = Instant::now();
        let mut diagnostics = Vec::new();

        // Setup runs once per method, before any sentence
        let requested: BTreeSet<Method> = methods.iter().copied().collect();
        let mut active = Vec::with_capacity(requested.len());
        for method in requested {
            let setup = match self.registry.get(method) {
                Ok(scorer) => scorer.validate().await.map(|()| scorer),
                Err(e) => Err(e),
            };
            match setup {
                Ok(scorer) => active.push((method, scorer)),
                Err(e) => {
                    warn!(
                        %method,
                        error = %e,
                        setup_error = e.is_setup_error(),
                        "method failed setup, dropping it from the run"
                    );
                    metrics::counter!(telemetry::METHODS_DROPPED_TOTAL,
                        "method" => method.as_str(),
                    )
                    .increment(1);
                    diagnostics.push(Diagnostic::MethodDropped {
                        method,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let mut table = ResultTable::new(active.iter().map(|(method, _)| *method));
        let mut recorder = TimingRecorder::new();

        for (idx, sentence) in sentences.iter().enumerate() {
            let sentence_index = idx + 1;
            let mut row = SentenceRecord::new(sentence.as_str());

            for (method, scorer) in &active {
                let output = match recorder
                    .time(*method, sentence_index, scorer.score(sentence))
                    .await
                {
                    Ok(score) => MethodOutput::Scored(score),
                    Err(e) => {
                        if e.is_setup_error() {
                            // the method stays in the run; later calls may recover
                            warn!(
                                %method,
                                sentence_index,
                                error = %e,
                                "credential or model rejected mid-run"
                            );
                        } else {
                            warn!(%method, sentence_index, error = %e, "scoring call failed");
                        }
                        diagnostics.push(Diagnostic::CallFailed {
                            method: *method,
                            sentence_index,
                            reason: e.to_string(),
                        });
                        MethodOutput::Error
                    }
                };
                row = row.with(*method, output);
            }
            table.push(row)?;
        }

        metrics::counter!(telemetry::SENTENCES_TOTAL).increment(sentences.len() as u64);
        let batch_elapsed = batch_start.elapsed();
        info!(
            rows = table.len(),
            methods = table.methods().len(),
            diagnostics = diagnostics.len(),
            batch_seconds = batch_elapsed.as_secs_f64(),
            "result table built"
        );

        Ok(RunOutcome {
            table,
            timings: recorder.into_samples(),
            diagnostics,
            batch_elapsed,
        })
    }
}

fn validate_input(sentences: &[String], methods: &[Method]) -> Result<()> {
    if sentences.is_empty() {
        return Err(SentimentSyncError::Validation(
            "Please enter at least one sentence.".to_string(),
        ));
    }
    if methods.is_empty() {
        return Err(SentimentSyncError::Validation(
            "Please select at least one method.".to_string(),
        ));
    }
    if let Some(pos) = sentences.iter().position(|s| s.trim().is_empty()) {
        return Err(SentimentSyncError::Validation(format!(
            "sentence #{} is blank",
            pos + 1
        )));
    }
    Ok(())
}
