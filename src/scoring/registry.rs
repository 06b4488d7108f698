//! Registry mapping each [`Method`] to its scorer.
//!
//! Dispatch is by enumerated method identifier, never by name string. The
//! registry iterates in declared method order, which is the order the table
//! builder scores a sentence in.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::traits::SentimentScorer;
use crate::types::Method;
use crate::{Result, SentimentSyncError};

/// Scorers keyed by method.
#[derive(Clone, Default)]
pub struct ScorerRegistry {
    scorers: BTreeMap<Method, Arc<dyn SentimentScorer>>,
}

impl ScorerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scorer under its own method, replacing any previous one.
    pub fn register(&mut self, scorer: Arc<dyn SentimentScorer>) {
        self.scorers.insert(scorer.method(), scorer);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, scorer: Arc<dyn SentimentScorer>) -> Self {
        self.register(scorer);
        self
    }

    pub fn get(&self, method: Method) -> Result<&Arc<dyn SentimentScorer>> {
        self.scorers
            .get(&method)
            .ok_or(SentimentSyncError::NoScorer(method))
    }

    pub fn contains(&self, method: Method) -> bool {
        self.scorers.contains_key(&method)
    }

    /// Registered methods in declared order.
    pub fn methods(&self) -> Vec<Method> {
        self.scorers.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.scorers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scorers.is_empty()
    }
}

impl std::fmt::Debug for ScorerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScorerRegistry")
            .field("methods", &self.methods())
            .finish()
    }
}
