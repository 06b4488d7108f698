//! Label confusion matrices between method pairs.

use crate::types::{ConfusionMatrix, Method, ResultTable};

/// Tally `a` (rows) against `b` (columns) over every sentence.
///
/// Sentences where either side is ERROR are left out and counted in
/// [`ConfusionMatrix::excluded`].
pub fn confusion_matrix(table: &ResultTable, a: Method, b: Method) -> ConfusionMatrix {
    let mut cm = ConfusionMatrix::new(a, b);
    for row in table.rows() {
        match (row.output(a).label(), row.output(b).label()) {
            (Some(actual), Some(predicted)) => cm.add(actual, predicted),
            _ => cm.excluded += 1,
        }
    }
    cm
}

/// One matrix per method pair.
pub fn analyze_confusion(table: &ResultTable) -> Vec<ConfusionMatrix> {
    table
        .method_pairs()
        .into_iter()
        .map(|(a, b)| confusion_matrix(table, a, b))
        .collect()
}
