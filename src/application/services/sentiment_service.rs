//! Text classification service.

use std::sync::Arc;

use crate::domain::classifier::SentimentClassifier;
use crate::domain::sentiment::SentimentLabel;
use crate::error::AppError;

/// Turns text into a [`SentimentLabel`] using an injected classifier.
///
/// Input validation happens before this service is called; it only scores
/// and partitions.
pub struct SentimentService {
    classifier: Arc<dyn SentimentClassifier>,
}

impl SentimentService {
    /// Creates a new sentiment service.
    pub fn new(classifier: Arc<dyn SentimentClassifier>) -> Self {
        Self { classifier }
    }

    /// Classifies `text` as positive, negative, or neutral.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] carrying the classifier's message if
    /// scoring fails.
    pub fn classify(&self, text: &str) -> Result<SentimentLabel, AppError> {
        let polarity = self.classifier.polarity(text)?;
        let label = SentimentLabel::from_polarity(polarity);

        tracing::debug!(
            polarity,
            label = label.as_str(),
            chars = text.chars().count(),
            "Text classified"
        );

        Ok(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classifier::{ClassifierError, MockSentimentClassifier};
    use mockall::predicate::eq;

    fn service_with(classifier: MockSentimentClassifier) -> SentimentService {
        SentimentService::new(Arc::new(classifier))
    }

    #[test]
    fn test_classify_maps_sign_of_polarity() {
        let mut classifier = MockSentimentClassifier::new();
        classifier
            .expect_polarity()
            .with(eq("I love this product"))
            .returning(|_| Ok(0.5));
        classifier
            .expect_polarity()
            .with(eq("I hate waiting in line"))
            .returning(|_| Ok(-0.8));
        classifier
            .expect_polarity()
            .with(eq("The sky is blue"))
            .returning(|_| Ok(0.0));

        let service = service_with(classifier);

        assert_eq!(
            service.classify("I love this product").unwrap(),
            SentimentLabel::Positive
        );
        assert_eq!(
            service.classify("I hate waiting in line").unwrap(),
            SentimentLabel::Negative
        );
        assert_eq!(
            service.classify("The sky is blue").unwrap(),
            SentimentLabel::Neutral
        );
    }

    #[test]
    fn test_classify_surfaces_classifier_failure() {
        let mut classifier = MockSentimentClassifier::new();
        classifier
            .expect_polarity()
            .times(1)
            .returning(|_| Err(ClassifierError::Failed("corpus not loaded".to_string())));

        let service = service_with(classifier);

        match service.classify("anything") {
            Err(AppError::Internal(message)) => assert_eq!(message, "corpus not loaded"),
            other => panic!("expected internal error, got {:?}", other),
        }
    }
}
