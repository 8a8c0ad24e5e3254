//! Mention ingestion for brandpulse.
//!
//! Searches a news backend for a brand, scores each article with a sentiment
//! strategy and hands the annotated mentions to a [`MentionStore`]. Backends
//! and strategies sit behind the [`SourceClient`] and [`SentimentClassifier`]
//! traits and are chosen once from [`AppConfig`](brandpulse_core::AppConfig).
//!
//! [`MentionStore`]: brandpulse_core::MentionStore

pub mod classifier;
pub mod error;
pub mod pipeline;
pub mod scorer;
pub mod sources;
pub mod types;

use std::time::Duration;

pub use classifier::{build_classifier, LexiconClassifier, RemoteClassifier, SentimentClassifier};
pub use error::{ClassifyError, SourceError};
pub use pipeline::IngestionPipeline;
pub use scorer::{compound_score, label_for_compound};
pub use sources::{build_source_client, GNewsClient, GdeltClient, SourceClient};
pub use types::IngestionSummary;

const USER_AGENT: &str = "brandpulse/0.1 (brand-mention-tracker)";

pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}
