//! The full comparison report of one run.

use serde::Serialize;

use super::agreement::{AgreementSummary, analyze_agreement};
use super::confusion::analyze_confusion;
use super::correlation::analyze_correlations;
use super::intensity::{MethodIntensity, mean_intensities};
use super::similarity::{SimilarityOptions, analyze_similarity};
use crate::Result;
use crate::pipeline::{Diagnostic, RunOutcome, TimingSummary};
use crate::types::{ConfusionMatrix, CorrelationEntry, PairwiseMetric, ResultTable, TimingSample};

/// Pairwise statistics; present only when two or more methods took part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodComparison {
    pub agreement: AgreementSummary,
    pub correlations: Vec<CorrelationEntry>,
    pub similarity: Vec<PairwiseMetric>,
    pub confusion: Vec<ConfusionMatrix>,
}

impl MethodComparison {
    /// Run every comparison analyzer over `table`.
    ///
    /// `None` when the table has fewer than two methods.
    pub fn compute(table: &ResultTable, options: SimilarityOptions) -> Option<Self> {
        let agreement = analyze_agreement(table)?;
        Some(Self {
            agreement,
            correlations: analyze_correlations(table),
            similarity: analyze_similarity(table, options),
            confusion: analyze_confusion(table),
        })
    }
}

/// Everything a caller needs to present a run.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub table: ResultTable,
    pub timing: TimingSummary,
    pub timings: Vec<TimingSample>,
    pub diagnostics: Vec<Diagnostic>,
    pub mean_intensities: Vec<MethodIntensity>,
    pub comparison: Option<MethodComparison>,
}

impl ComparisonReport {
    /// Note shown instead of the comparison sections for a single method.
    pub const NOT_APPLICABLE: &'static str =
        "Only one method selected. Comparison not applicable.";

    pub fn from_run(run: RunOutcome, options: SimilarityOptions) -> Self {
        let timing = TimingSummary::from_samples(&run.timings, run.batch_elapsed);
        let mean_intensities = mean_intensities(&run.table);
        let comparison = MethodComparison::compute(&run.table, options);
        Self {
            table: run.table,
            timing,
            timings: run.timings,
            diagnostics: run.diagnostics,
            mean_intensities,
            comparison,
        }
    }

    pub fn is_comparable(&self) -> bool {
        self.comparison.is_some()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
