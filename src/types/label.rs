//! Sentiment labels and per-method outputs.
//!
//! A scoring collaborator produces a [`Score`]: one of three canonical
//! labels plus a non-negative intensity. Inside a result table each cell is a
//! [`MethodOutput`], which is either that score or the ERROR marker left
//! behind by a failed call.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// The canonical sentiment labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Axis order used by confusion matrices.
    pub const MATRIX_ORDER: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
    ];

    /// Label order used by the macro-averaged set similarity.
    pub const SIMILARITY_ORDER: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
            SentimentLabel::Neutral => "NEUTRAL",
        }
    }

    /// Parse a label leniently (surrounding whitespace, any case).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "POSITIVE" => Some(SentimentLabel::Positive),
            "NEGATIVE" => Some(SentimentLabel::Negative),
            "NEUTRAL" => Some(SentimentLabel::Neutral),
            _ => None,
        }
    }

    /// Position of this label on the confusion-matrix axis.
    pub fn matrix_index(&self) -> usize {
        match self {
            SentimentLabel::Positive => 0,
            SentimentLabel::Neutral => 1,
            SentimentLabel::Negative => 2,
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a scoring collaborator returns for one sentence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub label: SentimentLabel,
    /// Rescaled magnitude, always >= 0.
    pub intensity: f64,
}

impl Score {
    pub fn new(label: SentimentLabel, intensity: f64) -> Self {
        Self { label, intensity }
    }
}

/// One (sentence, method) cell of the result table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MethodOutput {
    Scored(Score),
    /// The scoring call failed for this sentence.
    Error,
}

impl MethodOutput {
    /// Label text used in tables: the canonical label or `ERROR`.
    pub const ERROR_LABEL: &'static str = "ERROR";

    /// The canonical label, or `None` for the ERROR marker.
    pub fn label(&self) -> Option<SentimentLabel> {
        match self {
            MethodOutput::Scored(score) => Some(score.label),
            MethodOutput::Error => None,
        }
    }

    /// Intensity of the cell; the ERROR marker carries 0.0.
    pub fn intensity(&self) -> f64 {
        match self {
            MethodOutput::Scored(score) => score.intensity,
            MethodOutput::Error => 0.0,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, MethodOutput::Error)
    }

    pub fn label_str(&self) -> &'static str {
        match self {
            MethodOutput::Scored(score) => score.label.as_str(),
            MethodOutput::Error => Self::ERROR_LABEL,
        }
    }

    /// Whether two cells carry the same canonical label.
    ///
    /// ERROR never matches, not even another ERROR.
    pub fn agrees_with(&self, other: &MethodOutput) -> bool {
        match (self.label(), other.label()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Score> for MethodOutput {
    fn from(score: Score) -> Self {
        MethodOutput::Scored(score)
    }
}

impl Serialize for MethodOutput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("MethodOutput", 2)?;
        state.serialize_field("sentiment", self.label_str())?;
        state.serialize_field("intensity", &self.intensity())?;
        state.end()
    }
}
