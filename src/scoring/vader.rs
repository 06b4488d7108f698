//! Lexicon-based scoring in the style of VADER.
//!
//! Token valences come from a [`Lexicon`]; the scorer adjusts them for
//! boosters ("very", "slightly"), negation within the three preceding
//! tokens, ALL-CAPS emphasis, "but" contrast, and `!`/`?` emphasis, then
//! normalises the sum into a compound score in [-1, 1].

use async_trait::async_trait;

use super::intensity::score_polarity;
use super::lexicon::{Lexicon, tokenize};
use super::traits::SentimentScorer;
use crate::Result;
use crate::types::{Method, Score};

const B_INCR: f64 = 0.293;
const B_DECR: f64 = -0.293;
/// Added to a valence written in ALL CAPS among mixed-case text.
const C_INCR: f64 = 0.733;
const N_SCALAR: f64 = -0.74;
/// Normalisation constant: compound = s / sqrt(s^2 + ALPHA).
const ALPHA: f64 = 15.0;

const NEGATIONS: &[&str] = &[
    "aint", "ain't", "aren't", "cannot", "can't", "couldn't", "didn't", "doesn't", "don't",
    "hadn't", "hasn't", "haven't", "isn't", "neither", "never", "no", "nobody", "none", "nope",
    "nor", "not", "nothing", "nowhere", "shouldn't", "wasn't", "weren't", "without", "won't",
    "wouldn't",
];

const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", B_INCR),
    ("completely", B_INCR),
    ("especially", B_INCR),
    ("extremely", B_INCR),
    ("highly", B_INCR),
    ("incredibly", B_INCR),
    ("most", B_INCR),
    ("really", B_INCR),
    ("so", B_INCR),
    ("totally", B_INCR),
    ("very", B_INCR),
    ("barely", B_DECR),
    ("hardly", B_DECR),
    ("marginally", B_DECR),
    ("partly", B_DECR),
    ("slightly", B_DECR),
    ("somewhat", B_DECR),
];

fn booster(token: &str) -> Option<f64> {
    BOOSTERS
        .iter()
        .find(|(word, _)| *word == token)
        .map(|(_, scalar)| *scalar)
}

fn is_negation(token: &str) -> bool {
    NEGATIONS.contains(&token) || token.ends_with("n't")
}

fn is_shouting(token: &str) -> bool {
    token.chars().any(char::is_alphabetic) && token == token.to_uppercase()
}

/// Lexicon-based scorer (VADER-style compound valence).
#[derive(Debug, Clone)]
pub struct VaderScorer {
    lexicon: Lexicon,
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new(Lexicon::vader_seed())
    }
}

impl VaderScorer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Compound valence of `text`, in [-1, 1].
    pub fn compound(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();

        let shouting = tokens.iter().filter(|t| is_shouting(t)).count();
        let cap_differential = shouting > 0 && shouting < tokens.len();

        let mut valences = Vec::with_capacity(tokens.len());
        for (i, word) in lowered.iter().enumerate() {
            if booster(word).is_some() {
                valences.push(0.0);
                continue;
            }
            let Some(mut valence) = self.lexicon.get(word) else {
                valences.push(0.0);
                continue;
            };

            if cap_differential && is_shouting(tokens[i]) {
                valence += C_INCR.copysign(valence);
            }

            let mut negated = false;
            for distance in 1..=3usize {
                let Some(prev_idx) = i.checked_sub(distance) else {
                    break;
                };
                let prev = lowered[prev_idx].as_str();
                if let Some(mut scalar) = booster(prev) {
                    if valence < 0.0 {
                        scalar = -scalar;
                    }
                    if cap_differential && is_shouting(tokens[prev_idx]) {
                        scalar += C_INCR.copysign(valence);
                    }
                    scalar *= match distance {
                        1 => 1.0,
                        2 => 0.95,
                        _ => 0.9,
                    };
                    valence += scalar;
                }
                negated |= is_negation(prev);
            }
            if negated {
                valence *= N_SCALAR;
            }
            valences.push(valence);
        }

        // "but" shifts weight onto the clause that follows it
        if let Some(pivot) = lowered.iter().position(|w| w == "but") {
            for (i, valence) in valences.iter_mut().enumerate() {
                if i < pivot {
                    *valence *= 0.5;
                } else if i > pivot {
                    *valence *= 1.5;
                }
            }
        }

        let mut sum: f64 = valences.iter().sum();
        if sum != 0.0 {
            let emphasis = punctuation_emphasis(text);
            sum += emphasis.copysign(sum);
        }
        normalize(sum)
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64 * 0.292;
    let questions = text.matches('?').count();
    let question_amp = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * 0.18,
        _ => 0.96,
    };
    exclamations + question_amp
}

fn normalize(sum: f64) -> f64 {
    (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

#[async_trait]
impl SentimentScorer for VaderScorer {
    fn method(&self) -> Method {
        Method::Vader
    }

    async fn score(&self, sentence: &str) -> Result<Score> {
        Ok(score_polarity(self.compound(sentence)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SentimentLabel;

    fn scorer() -> VaderScorer {
        VaderScorer::default()
    }

    #[test]
    fn neutral_text_has_zero_compound() {
        assert_eq!(scorer().compound("It is a table."), 0.0);
    }

    #[test]
    fn positive_and_negative_sentences() {
        assert!(scorer().compound("I love this!") > 0.5);
        assert!(scorer().compound("This is terrible.") < -0.4);
    }

    #[test]
    fn negation_flips_polarity() {
        let plain = scorer().compound("This is good");
        let negated = scorer().compound("This is not good");
        assert!(plain > 0.0);
        assert!(negated < 0.0);
    }

    #[test]
    fn boosters_strengthen() {
        let plain = scorer().compound("This is good");
        let boosted = scorer().compound("This is very good");
        assert!(boosted > plain);
    }

    #[test]
    fn exclamation_strengthens() {
        let plain = scorer().compound("This is good");
        let excited = scorer().compound("This is good!!");
        assert!(excited > plain);
    }

    #[test]
    fn caps_emphasis_strengthens() {
        let plain = scorer().compound("this is good");
        let shouted = scorer().compound("this is GOOD");
        assert!(shouted > plain);
    }

    #[test]
    fn but_favours_second_clause() {
        let compound = scorer().compound("The food was good but the service was terrible");
        assert!(compound < 0.0);
    }

    #[test]
    fn compound_is_bounded() {
        let compound = scorer().compound("love love love love love love love love!!!!");
        assert!(compound <= 1.0);
        assert!(compound > 0.9);
    }

    #[tokio::test]
    async fn score_applies_shared_conventions() {
        let s = scorer();
        let score = s.score("I love this!").await.unwrap();
        assert_eq!(score.label, SentimentLabel::Positive);
        assert!(score.intensity > 0.0);

        let score = s.score("It is a table.").await.unwrap();
        assert_eq!(score.label, SentimentLabel::Neutral);
        assert_eq!(score.intensity, 0.0);
    }
}
