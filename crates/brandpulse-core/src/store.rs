//! Mention persistence capability.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use crate::mention::{AnnotatedMention, StoredMention};

/// Default number of mentions returned by [`MentionStore::get_recent_mentions`].
pub const DEFAULT_RECENT_LIMIT: usize = 50;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("store state unavailable: {0}")]
    Poisoned(String),
}

/// Persists annotated mentions, deduplicated by URL.
#[async_trait]
pub trait MentionStore: Send + Sync {
    /// Save a mention unless one with the same `url` already exists.
    ///
    /// Returns `true` when a new row was inserted and `false` when the URL was
    /// already present. A duplicate is a normal outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be reached.
    async fn save_mention(&self, mention: &AnnotatedMention) -> Result<bool, StoreError>;

    /// Most recent mentions by `published_at` descending, at most `limit` rows.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be reached.
    async fn get_recent_mentions(&self, limit: usize) -> Result<Vec<StoredMention>, StoreError>;

    /// Cheap liveness probe. Stores without a remote backend are always healthy.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend does not answer.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Process-local store used by tests and dry runs.
///
/// Ids are sequential integers rendered as strings, starting at `1`.
#[derive(Debug, Default)]
pub struct MemoryMentionStore {
    rows: Mutex<Vec<StoredMention>>,
    save_calls: AtomicUsize,
}

impl MemoryMentionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `save_mention` has been called, duplicates included.
    #[must_use]
    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    /// Snapshot of every stored row in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if a writer panicked while holding the lock.
    pub fn rows(&self) -> Result<Vec<StoredMention>, StoreError> {
        let rows = self
            .rows
            .lock()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        Ok(rows.clone())
    }
}

#[async_trait]
impl MentionStore for MemoryMentionStore {
    async fn save_mention(&self, mention: &AnnotatedMention) -> Result<bool, StoreError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);

        // Check and insert under one lock so concurrent callers cannot both insert.
        let mut rows = self
            .rows
            .lock()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;

        if rows.iter().any(|r| r.mention.mention.url == mention.mention.url) {
            return Ok(false);
        }

        let id = (rows.len() + 1).to_string();
        rows.push(StoredMention {
            id,
            mention: mention.clone(),
        });
        Ok(true)
    }

    async fn get_recent_mentions(&self, limit: usize) -> Result<Vec<StoredMention>, StoreError> {
        let rows = self
            .rows
            .lock()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;

        // Newest insertion first, then a stable sort keeps that order among
        // equal timestamps.
        let mut recent: Vec<StoredMention> = rows.iter().rev().cloned().collect();
        recent.sort_by(|a, b| {
            b.mention
                .mention
                .published_at
                .as_bytes()
                .cmp(a.mention.mention.published_at.as_bytes())
        });
        recent.truncate(limit);
        Ok(recent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mention::{Mention, MentionSource, Sentiment, SentimentLabel};

    fn annotated(url: &str, published_at: &str) -> AnnotatedMention {
        Mention {
            source: MentionSource::News,
            source_name: "Wire".to_string(),
            title: format!("title for {url}"),
            text: String::new(),
            url: url.to_string(),
            published_at: published_at.to_string(),
        }
        .annotate(Sentiment::new(SentimentLabel::Neutral, 0.0))
    }

    #[tokio::test]
    async fn duplicate_url_is_a_no_op() {
        let store = MemoryMentionStore::new();
        let m = annotated("https://example.com/a", "2025-01-01T00:00:00Z");

        assert!(store.save_mention(&m).await.unwrap());
        assert!(!store.save_mention(&m).await.unwrap());

        let rows = store.rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "1");
        assert_eq!(store.save_calls(), 2);
    }

    #[tokio::test]
    async fn recent_is_sorted_descending_and_limited() {
        let store = MemoryMentionStore::new();
        for (url, ts) in [
            ("https://example.com/1", "2025-01-02T00:00:00Z"),
            ("https://example.com/2", "2025-01-04T00:00:00Z"),
            ("https://example.com/3", "2025-01-01T00:00:00Z"),
            ("https://example.com/4", "2025-01-03T00:00:00Z"),
        ] {
            store.save_mention(&annotated(url, ts)).await.unwrap();
        }

        let recent = store.get_recent_mentions(3).await.unwrap();
        let stamps: Vec<&str> = recent
            .iter()
            .map(|r| r.mention.mention.published_at.as_str())
            .collect();
        assert_eq!(
            stamps,
            vec![
                "2025-01-04T00:00:00Z",
                "2025-01-03T00:00:00Z",
                "2025-01-02T00:00:00Z"
            ]
        );
    }

    #[tokio::test]
    async fn equal_timestamps_return_newest_insert_first() {
        let store = MemoryMentionStore::new();
        store
            .save_mention(&annotated("https://example.com/old", "2025-01-01"))
            .await
            .unwrap();
        store
            .save_mention(&annotated("https://example.com/new", "2025-01-01"))
            .await
            .unwrap();

        let recent = store.get_recent_mentions(DEFAULT_RECENT_LIMIT).await.unwrap();
        assert_eq!(recent[0].mention.mention.url, "https://example.com/new");
        assert_eq!(recent[1].mention.mention.url, "https://example.com/old");
    }

    #[tokio::test]
    async fn zero_limit_returns_nothing() {
        let store = MemoryMentionStore::new();
        store
            .save_mention(&annotated("https://example.com/a", "2025-01-01"))
            .await
            .unwrap();
        assert!(store.get_recent_mentions(0).await.unwrap().is_empty());
    }
}
