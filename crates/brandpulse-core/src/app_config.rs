use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which news search service feeds the ingestion pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsBackend {
    /// gnews.io search API (requires `NEWS_API_KEY`).
    GNews,
    /// GDELT DOC 2.0 article list (keyless).
    Gdelt,
}

impl std::fmt::Display for NewsBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NewsBackend::GNews => write!(f, "gnews"),
            NewsBackend::Gdelt => write!(f, "gdelt"),
        }
    }
}

/// Which sentiment strategy annotates mentions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentBackend {
    /// Local lexicon scorer producing a compound polarity.
    Lexicon,
    /// Hosted text-classification model.
    Remote,
}

impl std::fmt::Display for SentimentBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentBackend::Lexicon => write!(f, "lexicon"),
            SentimentBackend::Remote => write!(f, "remote"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_name: Option<String>,
    pub mentions_table: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub cors_origins: Vec<String>,
    pub news_backend: NewsBackend,
    pub news_api_key: Option<String>,
    pub sentiment_backend: SentimentBackend,
    pub sentiment_api_token: Option<String>,
    pub sentiment_model_url: String,
    pub sentiment_loading_retry_secs: u64,
    pub http_timeout_secs: u64,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("database_name", &self.database_name)
            .field("mentions_table", &self.mentions_table)
            .field("cors_origins", &self.cors_origins)
            .field("news_backend", &self.news_backend)
            .field(
                "news_api_key",
                &self.news_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("sentiment_backend", &self.sentiment_backend)
            .field(
                "sentiment_api_token",
                &self.sentiment_api_token.as_ref().map(|_| "[redacted]"),
            )
            .field("sentiment_model_url", &self.sentiment_model_url)
            .field(
                "sentiment_loading_retry_secs",
                &self.sentiment_loading_retry_secs,
            )
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
