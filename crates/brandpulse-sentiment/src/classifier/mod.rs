//! Sentiment strategies.

mod lexicon;
mod remote;

pub use lexicon::LexiconClassifier;
pub use remote::{RemoteClassifier, MAX_INPUT_CHARS};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use brandpulse_core::{AppConfig, Sentiment, SentimentBackend};

use crate::error::ClassifyError;

/// Scores text and returns a label plus a numeric score.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Short strategy name used in logs.
    fn name(&self) -> &'static str;

    /// Classify non-empty text.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError`] when the strategy cannot produce a label.
    async fn classify(&self, text: &str) -> Result<Sentiment, ClassifyError>;

    /// Classify `text`, never failing.
    ///
    /// Empty or whitespace-only input is `{Neutral, 0.0}` without touching
    /// the backend. Any classification error is logged and becomes
    /// `{Error, 0.0}`.
    async fn analyze_sentiment(&self, text: &str) -> Sentiment {
        if text.trim().is_empty() {
            return Sentiment::neutral();
        }

        match self.classify(text).await {
            Ok(sentiment) => sentiment,
            Err(ClassifyError::MissingToken) => {
                tracing::error!(
                    classifier = self.name(),
                    "SENTIMENT_API_TOKEN not set; cannot classify"
                );
                Sentiment::error()
            }
            Err(ClassifyError::Parse { error, body }) => {
                tracing::warn!(
                    classifier = self.name(),
                    error = %error,
                    body = %body,
                    "could not parse sentiment response"
                );
                Sentiment::error()
            }
            Err(e) => {
                tracing::warn!(classifier = self.name(), error = %e, "sentiment classification failed");
                Sentiment::error()
            }
        }
    }
}

/// Build the strategy selected by `SENTIMENT_BACKEND`.
///
/// # Errors
///
/// Returns [`ClassifyError::Http`] if the remote strategy's HTTP client cannot
/// be constructed.
pub fn build_classifier(
    config: &AppConfig,
) -> Result<Arc<dyn SentimentClassifier>, ClassifyError> {
    match config.sentiment_backend {
        SentimentBackend::Lexicon => Ok(Arc::new(LexiconClassifier::new())),
        SentimentBackend::Remote => {
            let classifier = RemoteClassifier::with_options(
                &config.sentiment_model_url,
                config.sentiment_api_token.clone(),
                Duration::from_secs(config.http_timeout_secs),
                Duration::from_secs(config.sentiment_loading_retry_secs),
            )?;
            Ok(Arc::new(classifier))
        }
    }
}
