//! SentimentSync - benchmark and compare sentiment-analysis methods
//!
//! This crate scores a batch of sentences with several sentiment-analysis
//! methods (lexicon-based, rule-based, LLM-based) behind one
//! [`SentimentScorer`] contract, times every call, and measures how far the
//! methods agree: label agreement, correlation of intensities, Jaccard
//! similarity of labels, and confusion matrices.
//!
//! # Example
//!
//! ```rust,no_run
//! use sentimentsync::{GeminiConfig, Lexicon, Method, SentimentSync};
//!
//! #[tokio::main]
//! async fn main() -> sentimentsync::Result<()> {
//!     let engine = SentimentSync::builder()
//!         .vader(Lexicon::vader_seed())
//!         .textblob(Lexicon::textblob_seed())
//!         .gemini(GeminiConfig::new("your-api-key", "gemini-1.5-flash"))
//!         .build()?;
//!
//!     let report = engine
//!         .analyze_text(
//!             "I love this product!\nThis is terrible.\nThe sky is blue.",
//!             &Method::ALL,
//!         )
//!         .await?;
//!
//!     for diagnostic in &report.diagnostics {
//!         eprintln!("{diagnostic}");
//!     }
//!     println!("{}", report.to_json()?);
//!     Ok(())
//! }
//! ```

pub mod analysis;
#[cfg(feature = "cli")]
pub mod config;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod scoring;
pub mod telemetry;
pub mod types;
pub mod version;

// Re-export main types at crate root
pub use analysis::{ComparisonReport, EmptyUnionPolicy, MethodComparison, SimilarityOptions};
pub use engine::{Engine, SentimentSync, SentimentSyncBuilder};
pub use error::{Result, SentimentSyncError};
pub use pipeline::{Diagnostic, RunOutcome, TableBuilder, TimingSummary, parse_sentences};
pub use scoring::{
    GeminiClient, GeminiConfig, Lexicon, ScorerRegistry, SentimentScorer, TextBlobScorer,
    VaderScorer,
};

pub use types::{
    ConfusionMatrix, CorrelationEntry, CorrelationKind, Method, MethodOutput, MetricValue,
    PairwiseMetric, ResultTable, Score, SentenceRecord, SentimentLabel, TimingSample,
};
