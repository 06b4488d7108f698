//! Scoring collaborators.
//!
//! Each sentiment-analysis method sits behind the [`SentimentScorer`]
//! contract: a lexicon-based scorer ([`VaderScorer`]), a rule-based scorer
//! ([`TextBlobScorer`]), and an LLM-based scorer ([`GeminiClient`]). All of
//! them share the thresholding and intensity conventions in [`intensity`].

pub mod gemini;
pub mod intensity;
pub mod lexicon;
pub mod registry;
pub mod textblob;
pub mod traits;
pub mod vader;

pub use gemini::{GeminiClient, GeminiConfig};
pub use intensity::{label_for_polarity, scale_intensity, score_polarity};
pub use lexicon::Lexicon;
pub use registry::ScorerRegistry;
pub use textblob::TextBlobScorer;
pub use traits::SentimentScorer;
pub use vader::VaderScorer;
