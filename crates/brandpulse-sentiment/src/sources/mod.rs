//! News search backends.

mod gdelt;
mod gnews;

pub use gdelt::GdeltClient;
pub use gnews::GNewsClient;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use brandpulse_core::{AppConfig, Mention, NewsBackend};

use crate::error::SourceError;

/// Articles requested per search.
pub const MAX_RESULTS: usize = 10;

/// Fetches news mentions of a brand from an external search service.
#[async_trait]
pub trait SourceClient: Send + Sync {
    /// Short backend name used in logs.
    fn name(&self) -> &'static str;

    /// Search for `brand_name` and normalize the results into [`Mention`]s.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on missing credentials, transport failure,
    /// a non-2xx status or an unparseable body.
    async fn fetch_mentions(&self, brand_name: &str) -> Result<Vec<Mention>, SourceError>;
}

/// Build the backend selected by `NEWS_BACKEND`.
///
/// # Errors
///
/// Returns [`SourceError::Http`] if the HTTP client cannot be built.
pub fn build_source_client(config: &AppConfig) -> Result<Arc<dyn SourceClient>, SourceError> {
    let timeout = Duration::from_secs(config.http_timeout_secs);
    let client: Arc<dyn SourceClient> = match config.news_backend {
        NewsBackend::GNews => Arc::new(GNewsClient::new(config.news_api_key.clone(), timeout)?),
        NewsBackend::Gdelt => Arc::new(GdeltClient::new(timeout)?),
    };
    Ok(client)
}
