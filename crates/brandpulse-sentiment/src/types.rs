use serde::Serialize;

/// Outcome of one ingestion run for a brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestionSummary {
    pub brand: String,
    /// Mentions returned by the source. Zero when the source failed.
    pub fetched: usize,
    /// Mentions whose URL was not already stored.
    pub new_mentions_count: usize,
    /// Saves that returned a store error.
    pub failed_saves: usize,
}

impl IngestionSummary {
    #[must_use]
    pub fn empty(brand: &str) -> Self {
        Self {
            brand: brand.to_string(),
            fetched: 0,
            new_mentions_count: 0,
            failed_saves: 0,
        }
    }

    /// Human-readable result reported by the HTTP boundary.
    #[must_use]
    pub fn message(&self) -> String {
        if self.new_mentions_count == 0 {
            format!("No new articles found for {}.", self.brand)
        } else {
            format!(
                "Process complete. Found and saved {} new mentions for {}.",
                self.new_mentions_count, self.brand
            )
        }
    }
}
