//! Ingestion pipeline orchestration.

use std::sync::Arc;

use brandpulse_core::MentionStore;

use crate::classifier::SentimentClassifier;
use crate::error::SourceError;
use crate::sources::SourceClient;
use crate::types::IngestionSummary;

/// Fetches, annotates and stores mentions for one brand per call.
#[derive(Clone)]
pub struct IngestionPipeline {
    source: Arc<dyn SourceClient>,
    classifier: Arc<dyn SentimentClassifier>,
    store: Arc<dyn MentionStore>,
}

impl std::fmt::Debug for IngestionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestionPipeline")
            .field("source", &self.source.name())
            .field("classifier", &self.classifier.name())
            .finish_non_exhaustive()
    }
}

impl IngestionPipeline {
    #[must_use]
    pub fn new(
        source: Arc<dyn SourceClient>,
        classifier: Arc<dyn SentimentClassifier>,
        store: Arc<dyn MentionStore>,
    ) -> Self {
        Self {
            source,
            classifier,
            store,
        }
    }

    /// Run the pipeline for one brand.
    ///
    /// 1. Fetch mentions. A source error or an empty result ends the run
    ///    with zero new mentions.
    /// 2. Classify `"{title}. {text}"` for each mention.
    /// 3. Save the annotated mention; only a fresh insert is counted.
    ///
    /// Mentions are processed one at a time, in source order. Store errors
    /// are logged and the run moves on to the next mention.
    pub async fn run(&self, brand_name: &str) -> IngestionSummary {
        let mentions = match self.source.fetch_mentions(brand_name).await {
            Ok(mentions) => mentions,
            Err(e) => {
                log_source_error(self.source.name(), brand_name, &e);
                return IngestionSummary::empty(brand_name);
            }
        };

        let mut summary = IngestionSummary {
            fetched: mentions.len(),
            ..IngestionSummary::empty(brand_name)
        };

        if mentions.is_empty() {
            tracing::info!(brand = brand_name, source = self.source.name(), "no mentions returned");
            return summary;
        }

        for mention in mentions {
            let sentiment = self
                .classifier
                .analyze_sentiment(&mention.classification_input())
                .await;
            let annotated = mention.annotate(sentiment);

            match self.store.save_mention(&annotated).await {
                Ok(true) => {
                    summary.new_mentions_count += 1;
                    tracing::debug!(
                        brand = brand_name,
                        url = %annotated.mention.url,
                        label = %annotated.sentiment.label,
                        "saved mention"
                    );
                }
                Ok(false) => {
                    tracing::debug!(url = %annotated.mention.url, "mention already stored");
                }
                Err(e) => {
                    summary.failed_saves += 1;
                    tracing::warn!(
                        brand = brand_name,
                        url = %annotated.mention.url,
                        error = %e,
                        "failed to save mention"
                    );
                }
            }
        }

        tracing::info!(
            brand = brand_name,
            fetched = summary.fetched,
            new = summary.new_mentions_count,
            failed = summary.failed_saves,
            "ingestion complete"
        );

        summary
    }
}

fn log_source_error(source: &str, brand: &str, error: &SourceError) {
    match error {
        SourceError::MissingApiKey { .. } => {
            tracing::error!(brand, source, error = %error, "news source not configured");
        }
        SourceError::Parse { body, .. } => {
            tracing::warn!(brand, source, error = %error, body = %body, "unexpected news response");
        }
        _ => {
            tracing::warn!(brand, source, error = %error, "news fetch failed");
        }
    }
}
