//! Sentiment classifier backends.
//!
//! - [`LexiconClassifier`] - Rule-based word-polarity scorer

mod lexicon;

pub use lexicon::LexiconClassifier;
