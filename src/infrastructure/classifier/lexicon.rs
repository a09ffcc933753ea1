//! Lexicon-based polarity scorer.

use std::collections::HashMap;

use crate::domain::classifier::{ClassifierError, SentimentClassifier};

/// Polarity multiplier applied by a negation to the next scored word.
const NEGATION_FACTOR: f64 = -0.5;

/// Rule-based scorer backed by a word-polarity lexicon.
///
/// Each scored word contributes its polarity, scaled by a preceding
/// intensifier and flipped (and damped) by a preceding negation. The text's
/// polarity is the mean of the contributions, clamped to `[-1.0, 1.0]`.
/// Text without any lexicon words scores exactly `0.0`.
pub struct LexiconClassifier {
    words: HashMap<String, f64>,
    negations: Vec<&'static str>,
    intensifiers: HashMap<&'static str, f64>,
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconClassifier {
    /// Creates a classifier with the built-in English lexicon.
    pub fn new() -> Self {
        let positive_words = [
            ("love", 0.5),
            ("loved", 0.7),
            ("lovely", 0.5),
            ("like", 0.2),
            ("good", 0.7),
            ("great", 0.8),
            ("excellent", 1.0),
            ("amazing", 0.6),
            ("awesome", 1.0),
            ("fantastic", 0.4),
            ("wonderful", 1.0),
            ("perfect", 1.0),
            ("best", 1.0),
            ("better", 0.5),
            ("nice", 0.6),
            ("happy", 0.8),
            ("glad", 0.5),
            ("beautiful", 0.85),
            ("brilliant", 0.9),
            ("enjoy", 0.4),
            ("enjoyed", 0.4),
            ("fun", 0.3),
            ("pleasant", 0.7),
            ("helpful", 0.5),
            ("friendly", 0.4),
            ("fast", 0.2),
            ("easy", 0.43),
            ("recommend", 0.4),
            ("impressive", 1.0),
            ("delightful", 1.0),
            ("satisfied", 0.5),
            ("thanks", 0.2),
            ("superb", 1.0),
            ("cool", 0.35),
            ("fine", 0.42),
            ("positive", 0.23),
            ("success", 0.3),
            ("successful", 0.75),
            ("win", 0.8),
        ];

        let negative_words = [
            ("hate", -0.8),
            ("hated", -0.9),
            ("bad", -0.7),
            ("worse", -0.4),
            ("worst", -1.0),
            ("terrible", -1.0),
            ("awful", -1.0),
            ("horrible", -1.0),
            ("poor", -0.4),
            ("sad", -0.5),
            ("angry", -0.5),
            ("annoying", -0.8),
            ("boring", -1.0),
            ("broken", -0.4),
            ("disappointed", -0.75),
            ("disappointing", -0.6),
            ("ugly", -0.7),
            ("slow", -0.3),
            ("useless", -0.5),
            ("wrong", -0.5),
            ("fail", -0.5),
            ("failed", -0.5),
            ("failure", -0.3),
            ("problem", -0.2),
            ("difficult", -0.5),
            ("stupid", -0.8),
            ("dislike", -0.6),
            ("unhappy", -0.6),
            ("painful", -0.7),
            ("negative", -0.3),
            ("waste", -0.2),
            ("rude", -0.3),
            ("dirty", -0.6),
            ("pathetic", -1.0),
            ("disgusting", -1.0),
        ];

        let words = positive_words
            .into_iter()
            .chain(negative_words)
            .map(|(word, score)| (word.to_string(), score))
            .collect();

        let negations = vec![
            "not", "no", "never", "neither", "nor", "none", "nothing", "cannot", "can't", "cant",
            "don't", "dont", "doesn't", "doesnt", "didn't", "didnt", "won't", "wont", "isn't",
            "isnt", "aren't", "arent", "wasn't", "wasnt", "weren't", "werent", "hardly",
        ];

        let intensifiers = HashMap::from([
            ("very", 1.3),
            ("really", 1.3),
            ("extremely", 1.5),
            ("incredibly", 1.5),
            ("so", 1.3),
            ("totally", 1.3),
            ("absolutely", 1.5),
            ("super", 1.3),
            ("quite", 1.1),
            ("pretty", 1.1),
            ("slightly", 0.5),
            ("somewhat", 0.7),
            ("barely", 0.4),
        ]);

        Self {
            words,
            negations,
            intensifiers,
        }
    }

    /// Adds or overrides a lexicon entry.
    pub fn with_word(mut self, word: &str, polarity: f64) -> Self {
        self.words.insert(word.to_lowercase(), polarity);
        self
    }

    fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .map(|token| token.trim_matches('\'').to_lowercase())
            .filter(|token| !token.is_empty())
    }

    /// Scores `text`.
    pub fn score(&self, text: &str) -> f64 {
        let mut contributions = Vec::new();
        let mut negated = false;
        let mut intensity = 1.0;

        for token in Self::tokenize(text) {
            if self.negations.contains(&token.as_str()) {
                negated = true;
                continue;
            }

            if let Some(&factor) = self.intensifiers.get(token.as_str()) {
                intensity *= factor;
                continue;
            }

            match self.words.get(&token) {
                Some(&polarity) => {
                    let mut value = polarity * intensity;
                    if negated {
                        value *= NEGATION_FACTOR;
                    }
                    contributions.push(value.clamp(-1.0, 1.0));
                    negated = false;
                    intensity = 1.0;
                }
                // intensifiers bind to the very next word; negation waits for a scored one
                None => intensity = 1.0,
            }
        }

        if contributions.is_empty() {
            return 0.0;
        }

        let mean = contributions.iter().sum::<f64>() / contributions.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

impl SentimentClassifier for LexiconClassifier {
    fn polarity(&self, text: &str) -> Result<f64, ClassifierError> {
        let score = self.score(text);
        if score.is_finite() {
            Ok(score)
        } else {
            Err(ClassifierError::Failed(format!(
                "lexicon produced a non-finite polarity ({score})"
            )))
        }
    }
}
