//! The mention data model.
//!
//! A mention moves through three shapes: [`Mention`] as fetched from a news
//! source, [`AnnotatedMention`] once sentiment is attached, and
//! [`StoredMention`] after the store has assigned it an id. Only an
//! annotated mention can be saved, so a stored row always carries sentiment.

use serde::{Deserialize, Serialize};

/// Origin tag for a mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MentionSource {
    News,
}

impl MentionSource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MentionSource::News => "News",
        }
    }

    /// Parse a stored source tag. Unknown tags yield `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "News" => Some(MentionSource::News),
            _ => None,
        }
    }
}

impl std::fmt::Display for MentionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical sentiment labels.
///
/// `Error` marks a mention whose classification failed; `Unknown` marks a
/// backend label outside the canonical set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Error,
    Unknown,
}

impl SentimentLabel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Error => "Error",
            SentimentLabel::Unknown => "Unknown",
        }
    }

    /// Parse a stored label. Anything unrecognized becomes `Unknown`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "Positive" => SentimentLabel::Positive,
            "Negative" => SentimentLabel::Negative,
            "Neutral" => SentimentLabel::Neutral,
            "Error" => SentimentLabel::Error,
            _ => SentimentLabel::Unknown,
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sentiment label with its numeric score.
///
/// For the lexicon strategy `score` is the compound polarity in `[-1.0, 1.0]`;
/// for the remote strategy it is the winning class confidence in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    pub score: f64,
}

impl Sentiment {
    #[must_use]
    pub fn new(label: SentimentLabel, score: f64) -> Self {
        Self { label, score }
    }

    /// `{Neutral, 0.0}`, returned for empty input.
    #[must_use]
    pub fn neutral() -> Self {
        Self::new(SentimentLabel::Neutral, 0.0)
    }

    /// `{Error, 0.0}`, returned when classification fails.
    #[must_use]
    pub fn error() -> Self {
        Self::new(SentimentLabel::Error, 0.0)
    }
}

/// One article as returned by a news source, before classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mention {
    pub source: MentionSource,
    pub source_name: String,
    pub title: String,
    pub text: String,
    /// Dedup key. Not validated.
    pub url: String,
    /// Sort key. Expected to be ISO-8601; never parsed.
    pub published_at: String,
}

impl Mention {
    /// Text submitted to the classifier: `"{title}. {text}"`.
    #[must_use]
    pub fn classification_input(&self) -> String {
        format!("{}. {}", self.title, self.text)
    }

    #[must_use]
    pub fn annotate(self, sentiment: Sentiment) -> AnnotatedMention {
        AnnotatedMention {
            mention: self,
            sentiment,
        }
    }
}

/// A mention with sentiment attached, ready to be saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedMention {
    #[serde(flatten)]
    pub mention: Mention,
    pub sentiment: Sentiment,
}

/// A persisted mention with its store-assigned id.
///
/// The id serializes as `_id`, the key the dashboard reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMention {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub mention: AnnotatedMention,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Mention {
        Mention {
            source: MentionSource::News,
            source_name: "The Verge".to_string(),
            title: "Acme launches rocket skates".to_string(),
            text: "Reviewers call them great.".to_string(),
            url: "https://example.com/acme-skates".to_string(),
            published_at: "2025-03-01T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn classification_input_joins_title_and_text() {
        assert_eq!(
            sample().classification_input(),
            "Acme launches rocket skates. Reviewers call them great."
        );
    }

    #[test]
    fn classification_input_keeps_separator_for_empty_fields() {
        let mut m = sample();
        m.title.clear();
        m.text.clear();
        assert_eq!(m.classification_input(), ". ");
    }

    #[test]
    fn label_parse_round_trips_and_defaults_to_unknown() {
        for label in [
            SentimentLabel::Positive,
            SentimentLabel::Negative,
            SentimentLabel::Neutral,
            SentimentLabel::Error,
            SentimentLabel::Unknown,
        ] {
            assert_eq!(SentimentLabel::parse(label.as_str()), label);
        }
        assert_eq!(SentimentLabel::parse("positive"), SentimentLabel::Unknown);
    }

    #[test]
    fn stored_mention_serializes_flat_with_underscore_id() {
        let stored = StoredMention {
            id: "42".to_string(),
            mention: sample().annotate(Sentiment::new(SentimentLabel::Positive, 0.62)),
        };
        let json = serde_json::to_value(&stored).expect("serialize");

        assert_eq!(json["_id"], "42");
        assert_eq!(json["source"], "News");
        assert_eq!(json["source_name"], "The Verge");
        assert_eq!(json["url"], "https://example.com/acme-skates");
        assert_eq!(json["published_at"], "2025-03-01T10:00:00Z");
        assert_eq!(json["sentiment"]["label"], "Positive");
        assert!((json["sentiment"]["score"].as_f64().unwrap() - 0.62).abs() < 1e-9);
        assert!(json.get("mention").is_none(), "nested structs must flatten");
    }

    #[test]
    fn source_tag_parse() {
        assert_eq!(MentionSource::parse("News"), Some(MentionSource::News));
        assert_eq!(MentionSource::parse("Reddit"), None);
    }
}
