//! Classifier interface producing polarity scores.

/// Errors raised by a sentiment classifier backend.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("{0}")]
    Failed(String),
}

/// Scores the polarity of a text.
///
/// The scale is owned by the implementation; callers only rely on the sign.
/// Scores are typically in `[-1.0, 1.0]`.
///
/// # Implementations
///
/// - [`crate::infrastructure::classifier::LexiconClassifier`] - Lexicon-based scorer
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait SentimentClassifier: Send + Sync {
    /// Returns the polarity of `text`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError`] if the backend cannot score the text.
    /// The error message is surfaced to the client unchanged.
    fn polarity(&self, text: &str) -> Result<f64, ClassifierError>;
}
