//! Public types for the SentimentSync API.

mod label;
mod method;
mod metric;
mod table;

pub use label::{MethodOutput, Score, SentimentLabel};
pub use method::Method;
pub use metric::{
    ConfusionMatrix, CorrelationEntry, CorrelationKind, MetricValue, PairwiseMetric, round_to,
};
pub use table::{ResultTable, SentenceRecord, TimingSample};
