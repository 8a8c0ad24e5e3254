//! gnews.io search client.

use std::time::Duration;

use async_trait::async_trait;
use brandpulse_core::{Mention, MentionSource};
use serde::Deserialize;

use super::{SourceClient, MAX_RESULTS};
use crate::error::{excerpt, SourceError};

const DEFAULT_BASE_URL: &str = "https://gnews.io/api/v4";
const BACKEND: &str = "gnews";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Article {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    #[serde(default)]
    published_at: String,
    source: Option<ArticleSource>,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    name: Option<String>,
}

/// Articles without a URL have no dedup key and are skipped.
fn article_to_mention(article: Article) -> Option<Mention> {
    let url = article.url.filter(|u| !u.trim().is_empty())?;
    Some(Mention {
        source: MentionSource::News,
        source_name: article.source.and_then(|s| s.name).unwrap_or_default(),
        title: article.title.unwrap_or_default(),
        text: article.description.unwrap_or_default(),
        url,
        published_at: article.published_at,
    })
}

#[derive(Clone)]
pub struct GNewsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for GNewsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GNewsClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .finish_non_exhaustive()
    }
}

impl GNewsClient {
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn new(api_key: Option<String>, timeout: Duration) -> Result<Self, SourceError> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, timeout)
    }

    /// Client against a different API root, e.g. a mock server.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn with_base_url(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        Ok(Self {
            client: crate::http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }
}

#[async_trait]
impl SourceClient for GNewsClient {
    fn name(&self) -> &'static str {
        BACKEND
    }

    async fn fetch_mentions(&self, brand_name: &str) -> Result<Vec<Mention>, SourceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SourceError::MissingApiKey { backend: BACKEND })?;

        let max = MAX_RESULTS.to_string();
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("q", brand_name),
                ("token", api_key),
                ("lang", "en"),
                ("max", max.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SourceError::Status {
                backend: BACKEND,
                status,
                body: excerpt(&body),
            });
        }

        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|error| SourceError::Parse {
                backend: BACKEND,
                error,
                body: excerpt(&body),
            })?;

        Ok(parsed
            .articles
            .into_iter()
            .filter_map(article_to_mention)
            .collect())
    }
}
