//! Macro-averaged Jaccard similarity of label columns.
//!
//! For each canonical label the set of sentences carrying it under method A
//! is intersected with the set under method B. Per-label IoU values are
//! averaged with equal weight. ERROR cells belong to no label set.

use serde::{Deserialize, Serialize};

use crate::types::{MetricValue, PairwiseMetric, ResultTable, SentimentLabel};

/// Decimal places of reported similarities.
pub const SIMILARITY_DECIMALS: u32 = 3;

/// Score given to a label neither method ever assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyUnionPolicy {
    /// The label scores 0.0 and still counts toward the mean.
    #[default]
    Zero,
    /// The label scores 1.0 (both methods agree it never occurs).
    One,
    /// The label is left out of the mean.
    Exclude,
}

/// Knobs of the similarity analyzer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityOptions {
    pub empty_union: EmptyUnionPolicy,
}

/// IoU of the sentence sets labelled `label` by each side.
///
/// `None` when neither side used the label.
pub fn label_jaccard(
    a: &[Option<SentimentLabel>],
    b: &[Option<SentimentLabel>],
    label: SentimentLabel,
) -> Option<f64> {
    let mut intersection = 0usize;
    let mut union = 0usize;
    for (x, y) in a.iter().zip(b) {
        let in_a = *x == Some(label);
        let in_b = *y == Some(label);
        if in_a && in_b {
            intersection += 1;
        }
        if in_a || in_b {
            union += 1;
        }
    }
    if union == 0 {
        return None;
    }
    Some(intersection as f64 / union as f64)
}

/// Macro Jaccard over the three canonical labels, rounded.
pub fn macro_jaccard(
    a: &[Option<SentimentLabel>],
    b: &[Option<SentimentLabel>],
    options: SimilarityOptions,
) -> MetricValue {
    let scores: Vec<f64> = SentimentLabel::SIMILARITY_ORDER
        .iter()
        .filter_map(|label| match label_jaccard(a, b, *label) {
            Some(score) => Some(score),
            None => match options.empty_union {
                EmptyUnionPolicy::Zero => Some(0.0),
                EmptyUnionPolicy::One => Some(1.0),
                EmptyUnionPolicy::Exclude => None,
            },
        })
        .collect();

    if scores.is_empty() {
        return MetricValue::NotAvailable;
    }
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    MetricValue::Value(mean).rounded(SIMILARITY_DECIMALS)
}

/// Similarity of every method pair.
pub fn analyze_similarity(table: &ResultTable, options: SimilarityOptions) -> Vec<PairwiseMetric> {
    table
        .method_pairs()
        .into_iter()
        .map(|(a, b)| {
            let value = macro_jaccard(&table.labels(a), &table.labels(b), options);
            PairwiseMetric::new(a, b, value)
        })
        .collect()
}
