use async_trait::async_trait;
use brandpulse_core::Sentiment;

use super::SentimentClassifier;
use crate::error::ClassifyError;
use crate::scorer::{compound_score, label_for_compound};

/// Local lexicon strategy. Never calls out and never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconClassifier;

impl LexiconClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SentimentClassifier for LexiconClassifier {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    async fn classify(&self, text: &str) -> Result<Sentiment, ClassifyError> {
        let score = compound_score(text);
        Ok(Sentiment::new(label_for_compound(score), score))
    }
}
