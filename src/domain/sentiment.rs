//! Sentiment label derived from a polarity score.

use serde::Serialize;
use std::fmt;

/// Coarse sentiment of a piece of text.
///
/// Serialized in lowercase (`"positive"`, `"negative"`, `"neutral"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Maps a polarity score to a label.
    ///
    /// Exact three-way partition with no tolerance band: anything strictly
    /// above zero is positive, strictly below is negative, everything else
    /// (`0.0`, `-0.0`, NaN) is neutral.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            Self::Positive
        } else if polarity < 0.0 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_polarity_partition() {
        assert_eq!(SentimentLabel::from_polarity(0.5), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_polarity(-0.8), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_polarity(0.0), SentimentLabel::Neutral);
    }

    #[test]
    fn test_from_polarity_has_no_tolerance_band() {
        assert_eq!(
            SentimentLabel::from_polarity(f64::MIN_POSITIVE),
            SentimentLabel::Positive
        );
        assert_eq!(
            SentimentLabel::from_polarity(-f64::MIN_POSITIVE),
            SentimentLabel::Negative
        );
        assert_eq!(SentimentLabel::from_polarity(-0.0), SentimentLabel::Neutral);
        assert_eq!(
            SentimentLabel::from_polarity(f64::NAN),
            SentimentLabel::Neutral
        );
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&SentimentLabel::Negative).unwrap();
        assert_eq!(json, "\"negative\"");
        assert_eq!(SentimentLabel::Neutral.to_string(), "neutral");
    }
}
