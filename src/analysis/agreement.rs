//! Label agreement between methods.
//!
//! A sentence is in agreement when every participating method gave it the
//! same canonical label. An ERROR cell breaks agreement for its sentence
//! and never counts as a pairwise match.

use serde::Serialize;

use crate::types::{MetricValue, PairwiseMetric, ResultTable, round_to};

/// Agreement figures for a table with two or more methods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgreementSummary {
    /// Unanimity flag per sentence, in row order.
    pub per_sentence: Vec<bool>,
    /// Share of unanimous sentences, in percent (2 decimals).
    pub overall_percent: MetricValue,
    /// Percent of sentences where each method pair matched (2 decimals).
    pub pairwise: Vec<PairwiseMetric>,
}

/// Percentage `count / total * 100`, rounded to 2 decimals.
fn percent(count: usize, total: usize) -> MetricValue {
    if total == 0 {
        return MetricValue::NotAvailable;
    }
    MetricValue::Value(round_to(count as f64 / total as f64 * 100.0, 2))
}

/// Unanimity flag for every row.
pub fn sentence_agreement(table: &ResultTable) -> Vec<bool> {
    table
        .rows()
        .iter()
        .map(|row| {
            let mut outputs = table.methods().iter().map(|m| row.output(*m));
            match outputs.next() {
                Some(first) => !first.is_error() && outputs.all(|o| o.agrees_with(&first)),
                None => false,
            }
        })
        .collect()
}

/// Percent of sentences on which all methods agree.
pub fn overall_agreement(table: &ResultTable) -> MetricValue {
    let flags = sentence_agreement(table);
    percent(flags.iter().filter(|agreed| **agreed).count(), flags.len())
}

/// Percent agreement for every method pair.
pub fn pairwise_agreement(table: &ResultTable) -> Vec<PairwiseMetric> {
    table
        .method_pairs()
        .into_iter()
        .map(|(a, b)| {
            // Two ERROR cells do not match, even though their label text is
            // equal. This keeps pairwise figures consistent with the
            // unanimity flag above.
            let matches = table
                .rows()
                .iter()
                .filter(|row| row.output(a).agrees_with(&row.output(b)))
                .count();
            PairwiseMetric::new(a, b, percent(matches, table.len()))
        })
        .collect()
}

/// Full agreement analysis; `None` when fewer than two methods took part.
pub fn analyze_agreement(table: &ResultTable) -> Option<AgreementSummary> {
    if !table.is_comparable() {
        return None;
    }
    let per_sentence = sentence_agreement(table);
    let agreed = per_sentence.iter().filter(|agreed| **agreed).count();
    Some(AgreementSummary {
        overall_percent: percent(agreed, per_sentence.len()),
        per_sentence,
        pairwise: pairwise_agreement(table),
    })
}
