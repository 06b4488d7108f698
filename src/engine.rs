//! Builder and engine for benchmarking runs.

use std::sync::Arc;

use tracing::instrument;

use crate::analysis::{ComparisonReport, EmptyUnionPolicy, SimilarityOptions};
use crate::pipeline::{RunOutcome, TableBuilder, parse_sentences};
use crate::scoring::{
    GeminiClient, GeminiConfig, Lexicon, ScorerRegistry, SentimentScorer, TextBlobScorer,
    VaderScorer,
};
use crate::types::Method;
use crate::{Result, SentimentSyncError};

/// Main entry point for creating engines.
pub struct SentimentSync;

impl SentimentSync {
    /// Create a new builder for configuring the engine.
    pub fn builder() -> SentimentSyncBuilder {
        SentimentSyncBuilder::new()
    }
}

/// Builder for configuring engines.
///
/// Every scorer is configured explicitly; nothing is read from the
/// environment.
pub struct SentimentSyncBuilder {
    vader: Option<Lexicon>,
    textblob: Option<Lexicon>,
    gemini: Option<GeminiConfig>,
    custom: Vec<Arc<dyn SentimentScorer>>,
    similarity: SimilarityOptions,
}

impl SentimentSyncBuilder {
    pub fn new() -> Self {
        Self {
            vader: None,
            textblob: None,
            gemini: None,
            custom: Vec::new(),
            similarity: SimilarityOptions::default(),
        }
    }

    /// Enable the lexicon-based scorer with the given valence lexicon.
    pub fn vader(mut self, lexicon: Lexicon) -> Self {
        self.vader = Some(lexicon);
        self
    }

    /// Enable the rule-based scorer with the given polarity lexicon.
    pub fn textblob(mut self, lexicon: Lexicon) -> Self {
        self.textblob = Some(lexicon);
        self
    }

    /// Enable the LLM-based scorer.
    ///
    /// The credential and model are only checked when a run starts; a bad
    /// configuration drops the method from that run.
    pub fn gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = Some(config);
        self
    }

    /// Register any scorer. It replaces a built-in scorer of the same method.
    pub fn scorer(mut self, scorer: Arc<dyn SentimentScorer>) -> Self {
        self.custom.push(scorer);
        self
    }

    pub fn similarity(mut self, options: SimilarityOptions) -> Self {
        self.similarity = options;
        self
    }

    /// Shorthand for setting [`SimilarityOptions::empty_union`].
    pub fn empty_union(mut self, policy: EmptyUnionPolicy) -> Self {
        self.similarity.empty_union = policy;
        self
    }

    /// Build the engine.
    pub fn build(self) -> Result<Engine> {
        let mut registry = ScorerRegistry::new();

        if let Some(lexicon) = self.vader {
            registry.register(Arc::new(VaderScorer::new(lexicon)));
        }
        if let Some(lexicon) = self.textblob {
            registry.register(Arc::new(TextBlobScorer::new(lexicon)));
        }
        if let Some(config) = self.gemini {
            registry.register(Arc::new(GeminiClient::new(config)?));
        }
        for scorer in self.custom {
            registry.register(scorer);
        }

        if registry.is_empty() {
            return Err(SentimentSyncError::Configuration(
                "no scoring method configured".to_string(),
            ));
        }

        Ok(Engine {
            registry,
            similarity: self.similarity,
        })
    }
}

impl Default for SentimentSyncBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Scores sentences with the configured methods and compares the results.
#[derive(Debug, Clone)]
pub struct Engine {
    registry: ScorerRegistry,
    similarity: SimilarityOptions,
}

impl Engine {
    /// Methods with a configured scorer, in declared order.
    pub fn methods(&self) -> Vec<Method> {
        self.registry.methods()
    }

    pub fn registry(&self) -> &ScorerRegistry {
        &self.registry
    }

    pub fn similarity_options(&self) -> SimilarityOptions {
        self.similarity
    }

    /// Build the result table without running the analyzers.
    pub async fn run(&self, sentences: &[String], methods: &[Method]) -> Result<RunOutcome> {
        TableBuilder::new(&self.registry).build(sentences, methods).await
    }

    /// Score `sentences` with `methods` and produce the full report.
    #[instrument(name = "engine.analyze", skip_all, fields(sentences = sentences.len()))]
    pub async fn analyze(&self, sentences: &[String], methods: &[Method]) -> Result<ComparisonReport> {
        let outcome = self.run(sentences, methods).await?;
        Ok(ComparisonReport::from_run(outcome, self.similarity))
    }

    /// [`analyze`](Self::analyze) over newline-separated text.
    pub async fn analyze_text(&self, text: &str, methods: &[Method]) -> Result<ComparisonReport> {
        self.analyze(&parse_sentences(text), methods).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_without_scorers_fails() {
        let err = SentimentSync::builder().build().unwrap_err();
        assert!(matches!(err, SentimentSyncError::Configuration(_)));
    }

    #[test]
    fn builder_registers_configured_methods() {
        let engine = SentimentSync::builder()
            .textblob(Lexicon::textblob_seed())
            .vader(Lexicon::vader_seed())
            .gemini(GeminiConfig::new("key", "gemini-1.5-flash"))
            .build()
            .unwrap();
        assert_eq!(engine.methods(), Method::ALL.to_vec());
    }

    #[test]
    fn empty_union_shorthand() {
        let engine = SentimentSync::builder()
            .vader(Lexicon::vader_seed())
            .empty_union(EmptyUnionPolicy::Exclude)
            .build()
            .unwrap();
        assert_eq!(engine.similarity_options().empty_union, EmptyUnionPolicy::Exclude);
    }
}
