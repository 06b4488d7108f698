//! The scoring collaborator contract.
//!
//! Every sentiment-analysis method is wrapped in a [`SentimentScorer`]. The
//! table builder only ever talks to this trait, so lexicon, rule-based, and
//! LLM scorers are interchangeable, and tests can substitute mocks.
//!
//! # Failure semantics
//!
//! - [`validate`](SentimentScorer::validate) runs once before any sentence is
//!   scored. An error there removes the method from the whole run.
//! - An error from [`score`](SentimentScorer::score) only affects that one
//!   sentence, which gets the ERROR marker.

use async_trait::async_trait;

use crate::Result;
use crate::types::{Method, Score};

/// A sentiment-analysis method that labels one sentence at a time.
#[async_trait]
pub trait SentimentScorer: Send + Sync {
    /// Which method this scorer implements.
    fn method(&self) -> Method;

    /// Scorer name for logging/debugging.
    fn name(&self) -> &str {
        self.method().as_str()
    }

    /// Check credentials/model before the run starts.
    ///
    /// Default implementation accepts; local scorers need no setup.
    async fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Label one sentence and rate its intensity.
    async fn score(&self, sentence: &str) -> Result<Score>;
}
