//! Rule-based scoring in the style of TextBlob's pattern analyzer.
//!
//! Each lexicon word found in the sentence contributes one assessment. An
//! intensifier multiplies the next assessment, a negation multiplies it by
//! -0.5, and a trailing `!` emphasises the last one. The polarity is the
//! mean of all assessments.

use async_trait::async_trait;

use super::intensity::score_polarity;
use super::lexicon::{Lexicon, tokenize};
use super::traits::SentimentScorer;
use crate::Result;
use crate::types::{Method, Score};

const NEGATION_SCALAR: f64 = -0.5;
const EXCLAMATION_SCALAR: f64 = 1.25;

const NEGATIONS: &[&str] = &["not", "never", "no", "n't", "cannot"];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("absolutely", 1.5),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("quite", 1.1),
    ("really", 1.3),
    ("so", 1.3),
    ("too", 1.2),
    ("very", 1.3),
    ("slightly", 0.5),
    ("somewhat", 0.7),
];

fn intensifier(token: &str) -> Option<f64> {
    INTENSIFIERS
        .iter()
        .find(|(word, _)| *word == token)
        .map(|(_, scalar)| *scalar)
}

fn is_negation(token: &str) -> bool {
    NEGATIONS.contains(&token) || token.ends_with("n't")
}

/// Rule-based scorer (TextBlob-style averaged polarity).
#[derive(Debug, Clone)]
pub struct TextBlobScorer {
    lexicon: Lexicon,
}

impl Default for TextBlobScorer {
    fn default() -> Self {
        Self::new(Lexicon::textblob_seed())
    }
}

impl TextBlobScorer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Polarity of `text`, in [-1, 1].
    pub fn polarity(&self, text: &str) -> f64 {
        let mut assessments: Vec<f64> = Vec::new();
        let mut negated = false;
        let mut multiplier: Option<f64> = None;

        for token in tokenize(text) {
            let word = token.to_lowercase();
            if is_negation(&word) {
                negated = true;
                continue;
            }
            if let Some(scalar) = intensifier(&word) {
                multiplier = Some(multiplier.unwrap_or(1.0) * scalar);
                continue;
            }
            if let Some(polarity) = self.lexicon.get(&word) {
                let mut assessment = polarity * multiplier.take().unwrap_or(1.0);
                if negated {
                    assessment *= NEGATION_SCALAR;
                    negated = false;
                }
                assessments.push(assessment);
            }
        }

        if text.trim_end().ends_with('!') {
            if let Some(last) = assessments.last_mut() {
                *last *= EXCLAMATION_SCALAR;
            }
        }

        if assessments.is_empty() {
            return 0.0;
        }
        let mean = assessments.iter().sum::<f64>() / assessments.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

#[async_trait]
impl SentimentScorer for TextBlobScorer {
    fn method(&self) -> Method {
        Method::TextBlob
    }

    async fn score(&self, sentence: &str) -> Result<Score> {
        Ok(score_polarity(self.polarity(sentence)))
    }
}
