//! Hosted text-classification model client.

use std::time::Duration;

use async_trait::async_trait;
use brandpulse_core::{Sentiment, SentimentLabel};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::SentimentClassifier;
use crate::error::{excerpt, ClassifyError};

/// Input is cut to this many characters before it is sent.
pub const MAX_INPUT_CHARS: usize = 512;

/// Remote inference strategy.
#[derive(Clone)]
pub struct RemoteClassifier {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
    loading_retry_delay: Duration,
}

impl std::fmt::Debug for RemoteClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteClassifier")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .field("loading_retry_delay", &self.loading_retry_delay)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<Candidate>>),
    Flat(Vec<Candidate>),
}

impl InferenceResponse {
    fn into_candidates(self) -> Vec<Candidate> {
        match self {
            InferenceResponse::Nested(outer) => outer.into_iter().flatten().collect(),
            InferenceResponse::Flat(candidates) => candidates,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
}

enum Attempt {
    Done(Sentiment),
    Loading,
}

impl RemoteClassifier {
    /// Classifier with a 30 s request timeout and a 20 s loading retry delay.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Http`] if the HTTP client cannot be built.
    pub fn new(url: &str, token: Option<String>) -> Result<Self, ClassifyError> {
        Self::with_options(url, token, Duration::from_secs(30), Duration::from_secs(20))
    }

    /// # Errors
    ///
    /// Returns [`ClassifyError::Http`] if the HTTP client cannot be built.
    pub fn with_options(
        url: &str,
        token: Option<String>,
        timeout: Duration,
        loading_retry_delay: Duration,
    ) -> Result<Self, ClassifyError> {
        Ok(Self {
            client: crate::http_client(timeout)?,
            url: url.to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
            loading_retry_delay,
        })
    }

    async fn attempt(&self, token: &str, inputs: &str) -> Result<Attempt, ClassifyError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(token)
            .json(&InferenceRequest { inputs })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::SERVICE_UNAVAILABLE && is_loading(&body) {
            return Ok(Attempt::Loading);
        }
        if !status.is_success() {
            return Err(ClassifyError::Status {
                status,
                body: excerpt(&body),
            });
        }

        let parsed: InferenceResponse =
            serde_json::from_str(&body).map_err(|error| ClassifyError::Parse {
                error,
                body: excerpt(&body),
            })?;

        let best = parsed
            .into_candidates()
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .ok_or(ClassifyError::EmptyResponse)?;

        Ok(Attempt::Done(Sentiment::new(
            map_model_label(&best.label),
            best.score,
        )))
    }
}

#[async_trait]
impl SentimentClassifier for RemoteClassifier {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn classify(&self, text: &str) -> Result<Sentiment, ClassifyError> {
        let token = self.token.as_deref().ok_or(ClassifyError::MissingToken)?;
        let inputs = truncate_chars(text, MAX_INPUT_CHARS);

        if let Attempt::Done(sentiment) = self.attempt(token, inputs).await? {
            return Ok(sentiment);
        }

        tracing::info!(
            delay_secs = self.loading_retry_delay.as_secs_f64(),
            "sentiment model loading; retrying once"
        );
        tokio::time::sleep(self.loading_retry_delay).await;

        match self.attempt(token, inputs).await? {
            Attempt::Done(sentiment) => Ok(sentiment),
            Attempt::Loading => Err(ClassifyError::ModelLoading),
        }
    }
}

fn is_loading(body: &str) -> bool {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error.to_ascii_lowercase().contains("loading"))
        .unwrap_or(false)
}

/// Map a model label to the canonical set, case-insensitively.
pub(crate) fn map_model_label(raw: &str) -> SentimentLabel {
    match raw.trim().to_ascii_lowercase().as_str() {
        "positive" | "label_2" => SentimentLabel::Positive,
        "neutral" | "label_1" => SentimentLabel::Neutral,
        "negative" | "label_0" => SentimentLabel::Negative,
        _ => SentimentLabel::Unknown,
    }
}

/// Longest prefix of `text` with at most `max` characters.
pub(crate) fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_named_and_indexed_labels() {
        assert_eq!(map_model_label("positive"), SentimentLabel::Positive);
        assert_eq!(map_model_label("LABEL_2"), SentimentLabel::Positive);
        assert_eq!(map_model_label("Neutral"), SentimentLabel::Neutral);
        assert_eq!(map_model_label("label_1"), SentimentLabel::Neutral);
        assert_eq!(map_model_label("NEGATIVE"), SentimentLabel::Negative);
        assert_eq!(map_model_label("LABEL_0"), SentimentLabel::Negative);
    }

    #[test]
    fn unrecognized_label_is_unknown() {
        assert_eq!(map_model_label("LABEL_3"), SentimentLabel::Unknown);
        assert_eq!(map_model_label("joy"), SentimentLabel::Unknown);
        assert_eq!(map_model_label(""), SentimentLabel::Unknown);
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_chars("hello", 512), "hello");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        let text = "é".repeat(600);
        let cut = truncate_chars(&text, MAX_INPUT_CHARS);
        assert_eq!(cut.chars().count(), MAX_INPUT_CHARS);
        assert_eq!(cut.len(), MAX_INPUT_CHARS * 2);
    }

    #[test]
    fn truncate_exact_length_is_unchanged() {
        let text = "a".repeat(MAX_INPUT_CHARS);
        assert_eq!(truncate_chars(&text, MAX_INPUT_CHARS), text);
    }

    #[test]
    fn loading_detection_reads_error_field() {
        assert!(is_loading(
            r#"{"error":"Model cardiffnlp/x is currently loading","estimated_time":20.0}"#
        ));
        assert!(!is_loading(r#"{"error":"Service Unavailable"}"#));
        assert!(!is_loading("upstream connect error"));
    }

    #[test]
    fn response_shapes_flatten() {
        let flat: InferenceResponse =
            serde_json::from_str(r#"[{"label":"positive","score":0.9}]"#).unwrap();
        assert_eq!(flat.into_candidates().len(), 1);

        let nested: InferenceResponse = serde_json::from_str(
            r#"[[{"label":"negative","score":0.1},{"label":"positive","score":0.8}]]"#,
        )
        .unwrap();
        assert_eq!(nested.into_candidates().len(), 2);
    }

    #[tokio::test]
    async fn missing_token_is_classify_error() {
        let classifier = RemoteClassifier::new("http://127.0.0.1:9/model", None).unwrap();
        let err = classifier.classify("Acme").await.unwrap_err();
        assert!(matches!(err, ClassifyError::MissingToken));
    }

    #[tokio::test]
    async fn blank_token_is_treated_as_missing() {
        let classifier =
            RemoteClassifier::new("http://127.0.0.1:9/model", Some("  ".to_string())).unwrap();
        let s = classifier.analyze_sentiment("Acme").await;
        assert_eq!(s, Sentiment::error());
    }

    #[test]
    fn debug_redacts_token() {
        let classifier =
            RemoteClassifier::new("http://localhost/model", Some("hf_secret".to_string()))
                .unwrap();
        let rendered = format!("{classifier:?}");
        assert!(!rendered.contains("hf_secret"));
        assert!(rendered.contains("[redacted]"));
    }
}
