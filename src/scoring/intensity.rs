//! Conventions shared by every scoring adapter.
//!
//! All adapters reduce their raw output to a polarity or confidence
//! magnitude `m` and then apply the same two mappings:
//!
//! - label: `m >= 0.05` is POSITIVE, `m <= -0.05` is NEGATIVE, otherwise NEUTRAL
//! - intensity: `exp(|m| * 5) - 1`, rounded to 3 decimals

use crate::types::{Score, SentimentLabel, round_to};

/// Polarity at or beyond which a sentence stops being neutral.
pub const NEUTRAL_BAND: f64 = 0.05;

/// Exponent scale applied to the magnitude before rescaling.
pub const INTENSITY_SCALE: f64 = 5.0;

/// Exponential rescaling of a polarity/confidence magnitude.
///
/// Always >= 0; strong polarities are stretched far more than weak ones.
pub fn scale_intensity(magnitude: f64) -> f64 {
    round_to((magnitude.abs() * INTENSITY_SCALE).exp() - 1.0, 3)
}

/// Threshold a signed polarity into a label.
pub fn label_for_polarity(polarity: f64) -> SentimentLabel {
    if polarity >= NEUTRAL_BAND {
        SentimentLabel::Positive
    } else if polarity <= -NEUTRAL_BAND {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Label and intensity for a signed polarity.
pub fn score_polarity(polarity: f64) -> Score {
    Score::new(label_for_polarity(polarity), scale_intensity(polarity))
}
