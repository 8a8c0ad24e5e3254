//! Shared domain types and configuration for brandpulse.

mod app_config;
mod config;
pub mod mention;
pub mod store;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, NewsBackend, SentimentBackend};
pub use config::{is_valid_identifier, load_app_config, load_app_config_from_env};
pub use mention::{
    AnnotatedMention, Mention, MentionSource, Sentiment, SentimentLabel, StoredMention,
};
pub use store::{MemoryMentionStore, MentionStore, StoreError, DEFAULT_RECENT_LIMIT};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
