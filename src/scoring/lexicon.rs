//! Word → valence lexicons for the local scorers.
//!
//! Files use the VADER lexicon layout: one entry per line, the token and its
//! mean valence separated by a tab, any further columns ignored. Lines that
//! are empty or start with `#` are skipped.
//!
//! ```text
//! love	3.2	0.4	[3, 3, 3, 4, 3, 4, 3, 3, 3, 3]
//! terrible	-2.1	0.83066	[-1, -3, -2, -3, -2, -1, -2, -3, -2, -2]
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::{Result, SentimentSyncError};

/// Built-in valences on VADER's -4..=4 scale.
const VADER_SEED: &[(&str, f64)] = &[
    ("amazing", 2.8),
    ("angry", -2.3),
    ("awesome", 3.1),
    ("awful", -2.0),
    ("bad", -2.5),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("boring", -1.3),
    ("broken", -1.6),
    ("cool", 1.3),
    ("delight", 2.9),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("enjoy", 2.2),
    ("excellent", 2.7),
    ("fail", -2.5),
    ("fantastic", 2.6),
    ("fine", 0.8),
    ("glad", 2.0),
    ("good", 1.9),
    ("great", 3.1),
    ("happy", 2.7),
    ("hate", -2.7),
    ("horrible", -2.5),
    ("like", 2.0),
    ("love", 3.2),
    ("nice", 1.8),
    ("poor", -2.1),
    ("sad", -2.1),
    ("terrible", -2.1),
    ("ugly", -2.3),
    ("wonderful", 2.7),
    ("worst", -3.1),
    ("wrong", -2.1),
];

/// Built-in polarities on TextBlob's -1..=1 scale.
const TEXTBLOB_SEED: &[(&str, f64)] = &[
    ("amazing", 0.6),
    ("angry", -0.5),
    ("awesome", 1.0),
    ("awful", -1.0),
    ("bad", -0.7),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("boring", -1.0),
    ("broken", -0.4),
    ("cool", 0.35),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("excellent", 1.0),
    ("fantastic", 0.4),
    ("fine", 0.4),
    ("glad", 0.5),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("love", 0.5),
    ("nice", 0.6),
    ("poor", -0.4),
    ("sad", -0.5),
    ("terrible", -1.0),
    ("ugly", -0.7),
    ("wonderful", 1.0),
    ("worst", -1.0),
    ("wrong", -0.5),
];

/// Case-insensitive token → valence map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lexicon {
    entries: HashMap<String, f64>,
}

impl Lexicon {
    /// Create an empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a lexicon from `(token, valence)` pairs.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut lexicon = Self::new();
        for (token, valence) in entries {
            lexicon.insert(token.as_ref(), valence);
        }
        lexicon
    }

    /// Seed lexicon for the lexicon-based scorer.
    pub fn vader_seed() -> Self {
        Self::from_entries(VADER_SEED.iter().copied())
    }

    /// Seed lexicon for the rule-based scorer.
    pub fn textblob_seed() -> Self {
        Self::from_entries(TEXTBLOB_SEED.iter().copied())
    }

    /// Parse lexicon text.
    pub fn parse(content: &str) -> Result<Self> {
        let mut lexicon = Self::new();
        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = if line.contains('\t') {
                line.split('\t').collect()
            } else {
                line.split_whitespace().collect()
            };
            let token = fields[0].trim();
            if token.is_empty() {
                return Err(SentimentSyncError::Lexicon(format!(
                    "line {}: empty token",
                    lineno + 1
                )));
            }
            let valence = fields.get(1).map(|v| v.trim()).ok_or_else(|| {
                SentimentSyncError::Lexicon(format!("line {}: missing valence", lineno + 1))
            })?;
            let valence: f64 = valence.parse().map_err(|_| {
                SentimentSyncError::Lexicon(format!(
                    "line {}: invalid valence '{valence}' for '{token}'",
                    lineno + 1
                ))
            })?;
            lexicon.insert(token, valence);
        }
        Ok(lexicon)
    }

    /// Load a lexicon file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SentimentSyncError::Lexicon(format!("Failed to read lexicon {path:?}: {e}"))
        })?;
        Self::parse(&content)
    }

    pub fn insert(&mut self, token: &str, valence: f64) {
        self.entries.insert(token.to_lowercase(), valence);
    }

    pub fn get(&self, token: &str) -> Option<f64> {
        self.entries.get(&token.to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split text into lexicon lookup tokens, keeping original case.
///
/// Surrounding punctuation is stripped; a token made only of punctuation
/// (an emoticon such as `:)`) is kept as is.
pub(crate) fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|raw| {
            let stripped = raw.trim_matches(|c: char| c.is_ascii_punctuation() && c != '\'');
            if stripped.is_empty() { raw } else { stripped }
        })
        .collect()
}
