//! Mean intensity per method, the data behind the intensity bar chart.

use serde::Serialize;

use crate::types::{Method, MetricValue, ResultTable};

/// Mean intensity of one method's column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodIntensity {
    pub method: Method,
    /// Rounded to 3 decimals; ERROR cells count as 0.0.
    pub mean: MetricValue,
}

/// One entry per participating method, in declared order.
pub fn mean_intensities(table: &ResultTable) -> Vec<MethodIntensity> {
    table
        .methods()
        .iter()
        .map(|method| {
            let values = table.intensities(*method);
            let mean = if values.is_empty() {
                MetricValue::NotAvailable
            } else {
                MetricValue::Value(values.iter().sum::<f64>() / values.len() as f64).rounded(3)
            };
            MethodIntensity {
                method: *method,
                mean,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MethodOutput, Score, SentenceRecord, SentimentLabel};

    #[test]
    fn error_cells_pull_the_mean_down() {
        let table = ResultTable::from_rows(
            [Method::Gemini],
            [
                SentenceRecord::new("a")
                    .with(Method::Gemini, Score::new(SentimentLabel::Positive, 3.0)),
                SentenceRecord::new("b").with(Method::Gemini, MethodOutput::Error),
            ],
        )
        .unwrap();
        let means = mean_intensities(&table);
        assert_eq!(means.len(), 1);
        assert_eq!(means[0].mean, MetricValue::Value(1.5));
    }

    #[test]
    fn empty_table_has_no_mean() {
        let table = ResultTable::new([Method::Vader]);
        assert_eq!(mean_intensities(&table)[0].mean, MetricValue::NotAvailable);
    }
}
