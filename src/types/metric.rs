//! Comparison metric shapes shared by the analyzers.

use std::fmt;

use serde::{Serialize, Serializer};

use super::{Method, SentimentLabel};

/// A metric value, or the `N/A` sentinel when it is mathematically undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Value(f64),
    NotAvailable,
}

impl MetricValue {
    /// Wrap a computed value; non-finite results become `N/A`.
    pub fn from_option(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => MetricValue::Value(v),
            _ => MetricValue::NotAvailable,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            MetricValue::Value(v) => Some(*v),
            MetricValue::NotAvailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, MetricValue::Value(_))
    }

    /// Round to `decimals` places, leaving `N/A` untouched.
    pub fn rounded(self, decimals: u32) -> Self {
        match self {
            MetricValue::Value(v) => MetricValue::Value(round_to(v, decimals)),
            na => na,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Value(v) => write!(f, "{v}"),
            MetricValue::NotAvailable => f.write_str("N/A"),
        }
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetricValue::Value(v) => serializer.serialize_f64(*v),
            MetricValue::NotAvailable => serializer.serialize_str("N/A"),
        }
    }
}

/// Round half away from zero to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// A value computed for one unordered pair of distinct methods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairwiseMetric {
    pub method_a: Method,
    pub method_b: Method,
    pub value: MetricValue,
}

impl PairwiseMetric {
    pub fn new(method_a: Method, method_b: Method, value: MetricValue) -> Self {
        Self {
            method_a,
            method_b,
            value,
        }
    }
}

/// The three correlation coefficients computed between intensity columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CorrelationKind {
    Pearson,
    Spearman,
    Kendall,
}

impl CorrelationKind {
    /// Report order.
    pub const ALL: [CorrelationKind; 3] = [
        CorrelationKind::Pearson,
        CorrelationKind::Spearman,
        CorrelationKind::Kendall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CorrelationKind::Pearson => "Pearson",
            CorrelationKind::Spearman => "Spearman",
            CorrelationKind::Kendall => "Kendall",
        }
    }
}

impl fmt::Display for CorrelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One correlation cell: a coefficient kind applied to one method pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationEntry {
    pub kind: CorrelationKind,
    #[serde(flatten)]
    pub metric: PairwiseMetric,
}

/// Co-occurrence counts of two methods' labels.
///
/// Rows are `method_a` ("actual"), columns `method_b` ("predicted"), both
/// indexed by [`SentimentLabel::MATRIX_ORDER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    pub method_a: Method,
    pub method_b: Method,
    pub matrix: [[u64; 3]; 3],
    /// Sentences left out because either side was ERROR.
    pub excluded: usize,
}

impl ConfusionMatrix {
    pub fn new(method_a: Method, method_b: Method) -> Self {
        Self {
            method_a,
            method_b,
            matrix: [[0; 3]; 3],
            excluded: 0,
        }
    }

    /// Tally one sentence.
    pub fn add(&mut self, actual: SentimentLabel, predicted: SentimentLabel) {
        self.matrix[actual.matrix_index()][predicted.matrix_index()] += 1;
    }

    pub fn get(&self, actual: SentimentLabel, predicted: SentimentLabel) -> u64 {
        self.matrix[actual.matrix_index()][predicted.matrix_index()]
    }

    /// Sum of all tallies.
    pub fn total(&self) -> u64 {
        self.matrix.iter().flatten().sum()
    }

    /// Tallies on the diagonal (both methods agree).
    pub fn agreements(&self) -> u64 {
        (0..3).map(|i| self.matrix[i][i]).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_places() {
        assert_eq!(round_to(66.666_666, 2), 66.67);
        assert_eq!(round_to(0.123_456, 3), 0.123);
        assert_eq!(round_to(-0.5556, 3), -0.556);
    }

    #[test]
    fn non_finite_becomes_not_available() {
        assert_eq!(MetricValue::from_option(Some(f64::NAN)), MetricValue::NotAvailable);
        assert_eq!(MetricValue::from_option(None), MetricValue::NotAvailable);
        assert_eq!(MetricValue::from_option(Some(0.5)), MetricValue::Value(0.5));
    }

    #[test]
    fn not_available_serializes_as_sentinel() {
        assert_eq!(serde_json::to_string(&MetricValue::NotAvailable).unwrap(), "\"N/A\"");
        assert_eq!(serde_json::to_string(&MetricValue::Value(0.25)).unwrap(), "0.25");
        assert_eq!(MetricValue::NotAvailable.to_string(), "N/A");
    }

    #[test]
    fn confusion_matrix_tallies() {
        let mut cm = ConfusionMatrix::new(Method::Vader, Method::TextBlob);
        cm.add(SentimentLabel::Positive, SentimentLabel::Positive);
        cm.add(SentimentLabel::Positive, SentimentLabel::Negative);
        cm.add(SentimentLabel::Neutral, SentimentLabel::Neutral);
        assert_eq!(cm.total(), 3);
        assert_eq!(cm.agreements(), 2);
        assert_eq!(cm.get(SentimentLabel::Positive, SentimentLabel::Negative), 1);
        assert_eq!(cm.matrix[0][2], 1);
    }
}
