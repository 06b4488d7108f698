//! Comparison analyzers over a finished [`ResultTable`](crate::types::ResultTable).
//!
//! Every analyzer is a pure function of the table. Pairwise results follow
//! the table's declared method order, `i < j`.

pub mod agreement;
pub mod confusion;
pub mod correlation;
pub mod intensity;
mod report;
pub mod similarity;

pub use agreement::{AgreementSummary, analyze_agreement};
pub use confusion::{analyze_confusion, confusion_matrix};
pub use correlation::{analyze_correlations, correlate, kendall, pearson, spearman};
pub use intensity::{MethodIntensity, mean_intensities};
pub use report::{ComparisonReport, MethodComparison};
pub use similarity::{EmptyUnionPolicy, SimilarityOptions, analyze_similarity, macro_jaccard};
