//! Sentiment-analysis method identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::SentimentSyncError;

/// A sentiment-analysis method that can take part in a run.
///
/// The declaration order is the fixed method order used everywhere: rows
/// are scored in this order, and pairwise metrics iterate `i < j` over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Method {
    /// Lexicon-based scoring (VADER-style compound valence).
    #[serde(rename = "VADER")]
    Vader,
    /// Rule-based scoring (TextBlob-style averaged polarity).
    #[serde(rename = "TextBlob")]
    TextBlob,
    /// LLM-based scoring via the Gemini API.
    #[serde(rename = "Gemini")]
    Gemini,
}

impl Method {
    /// All methods in declared order.
    pub const ALL: [Method; 3] = [Method::Vader, Method::TextBlob, Method::Gemini];

    /// Display name, as shown in tables and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Vader => "VADER",
            Method::TextBlob => "TextBlob",
            Method::Gemini => "Gemini",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = SentimentSyncError;

    /// Case-insensitive parse of a method name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vader" => Ok(Method::Vader),
            "textblob" => Ok(Method::TextBlob),
            "gemini" => Ok(Method::Gemini),
            _ => Err(SentimentSyncError::UnknownMethod(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_order_is_vader_textblob_gemini() {
        let mut methods = vec![Method::Gemini, Method::Vader, Method::TextBlob];
        methods.sort();
        assert_eq!(methods, Method::ALL.to_vec());
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("vader".parse::<Method>().unwrap(), Method::Vader);
        assert_eq!("TEXTBLOB".parse::<Method>().unwrap(), Method::TextBlob);
        assert_eq!(" Gemini ".parse::<Method>().unwrap(), Method::Gemini);
    }

    #[test]
    fn parse_unknown_method_fails() {
        let err = "bert".parse::<Method>().unwrap_err();
        assert!(matches!(err, SentimentSyncError::UnknownMethod(ref s) if s == "bert"));
    }

    #[test]
    fn serializes_as_display_name() {
        assert_eq!(serde_json::to_string(&Method::Vader).unwrap(), "\"VADER\"");
        assert_eq!(serde_json::to_string(&Method::TextBlob).unwrap(), "\"TextBlob\"");
    }
}
