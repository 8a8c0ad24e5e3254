//! GDELT DOC 2.0 article list client. Keyless.

use std::time::Duration;

use async_trait::async_trait;
use brandpulse_core::{Mention, MentionSource};
use chrono::{NaiveDateTime, SecondsFormat};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;

use super::{SourceClient, MAX_RESULTS};
use crate::error::{excerpt, SourceError};

const DEFAULT_ENDPOINT: &str = "https://api.gdeltproject.org/api/v2/doc/doc";
const BACKEND: &str = "gdelt";
const SEEN_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

#[derive(Debug, Deserialize)]
struct GdeltResponse {
    #[serde(default)]
    articles: Vec<GdeltArticle>,
}

#[derive(Debug, Deserialize)]
struct GdeltArticle {
    url: Option<String>,
    title: Option<String>,
    domain: Option<String>,
    #[serde(rename = "seendate")]
    seen_date: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GdeltClient {
    client: reqwest::Client,
    endpoint: String,
}

impl GdeltClient {
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, SourceError> {
        Self::with_base_url(DEFAULT_ENDPOINT, timeout)
    }

    /// Client against a different DOC endpoint, e.g. a mock server.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn with_base_url(endpoint: &str, timeout: Duration) -> Result<Self, SourceError> {
        Ok(Self {
            client: crate::http_client(timeout)?,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SourceClient for GdeltClient {
    fn name(&self) -> &'static str {
        BACKEND
    }

    async fn fetch_mentions(&self, brand_name: &str) -> Result<Vec<Mention>, SourceError> {
        let query = format!("\"{brand_name}\" sourcelang:english");
        let encoded = utf8_percent_encode(&query, NON_ALPHANUMERIC).to_string();
        let url = format!(
            "{}?query={encoded}&mode=ArtList&format=json&maxrecords={MAX_RESULTS}",
            self.endpoint
        );

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SourceError::Status {
                backend: BACKEND,
                status,
                body: excerpt(&body),
            });
        }

        // GDELT answers a query with no hits with an empty body.
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        let parsed: GdeltResponse =
            serde_json::from_str(&body).map_err(|error| SourceError::Parse {
                backend: BACKEND,
                error,
                body: excerpt(&body),
            })?;

        Ok(parsed
            .articles
            .into_iter()
            .filter_map(article_to_mention)
            .take(MAX_RESULTS)
            .collect())
    }
}

fn article_to_mention(article: GdeltArticle) -> Option<Mention> {
    let url = article.url.filter(|u| !u.trim().is_empty())?;
    Some(Mention {
        source: MentionSource::News,
        source_name: article.domain.unwrap_or_default(),
        title: article.title.unwrap_or_default(),
        text: String::new(),
        url,
        published_at: article
            .seen_date
            .as_deref()
            .map(normalize_seen_date)
            .unwrap_or_default(),
    })
}

/// `20250301T101500Z` → `2025-03-01T10:15:00Z`. Unparseable values pass through.
pub(crate) fn normalize_seen_date(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw.trim(), SEEN_DATE_FORMAT).map_or_else(
        |_| raw.to_string(),
        |dt| dt.and_utc().to_rfc3339_opts(SecondsFormat::Secs, true),
    )
}
