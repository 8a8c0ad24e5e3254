use crate::app_config::{AppConfig, Environment, NewsBackend, SentimentBackend};
use crate::ConfigError;

const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:5173,http://localhost:3000,https://brand-reputation-tracker-ten.vercel.app";

const DEFAULT_SENTIMENT_MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/cardiffnlp/twitter-roberta-base-sentiment-latest";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation live here, decoupled from the process environment,
/// so tests can drive it with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank values count as unset so an empty `NEWS_API_KEY=` in `.env`
    // degrades the same way a missing one does.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let database_url = require("DATABASE_URL")?;
    let database_name = optional("DATABASE_NAME");

    let mentions_table = or_default("MENTIONS_TABLE", "mentions");
    if !is_valid_identifier(&mentions_table) {
        return Err(invalid(
            "MENTIONS_TABLE",
            format!("'{mentions_table}' is not a plain SQL identifier"),
        ));
    }

    let env = parse_environment(&or_default("BRANDPULSE_ENV", "development"))?;
    let bind_addr = parse_addr("BRANDPULSE_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default("BRANDPULSE_LOG_LEVEL", "info");
    let cors_origins = parse_origins(&or_default("BRANDPULSE_CORS_ORIGINS", DEFAULT_CORS_ORIGINS));

    let news_backend = parse_news_backend(&or_default("NEWS_BACKEND", "gnews"))?;
    let news_api_key = optional("NEWS_API_KEY");

    let sentiment_backend = parse_sentiment_backend(&or_default("SENTIMENT_BACKEND", "lexicon"))?;
    let sentiment_api_token = optional("SENTIMENT_API_TOKEN");
    let sentiment_model_url = or_default("SENTIMENT_MODEL_URL", DEFAULT_SENTIMENT_MODEL_URL);
    let sentiment_loading_retry_secs = parse_u64("SENTIMENT_LOADING_RETRY_SECS", "20")?;

    let http_timeout_secs = parse_u64("BRANDPULSE_HTTP_TIMEOUT_SECS", "30")?;

    let db_max_connections = parse_u32("BRANDPULSE_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("BRANDPULSE_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("BRANDPULSE_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    if db_min_connections > db_max_connections {
        return Err(invalid(
            "BRANDPULSE_DB_MIN_CONNECTIONS",
            format!("{db_min_connections} exceeds BRANDPULSE_DB_MAX_CONNECTIONS ({db_max_connections})"),
        ));
    }

    Ok(AppConfig {
        database_url,
        database_name,
        mentions_table,
        env,
        bind_addr,
        log_level,
        cors_origins,
        news_backend,
        news_api_key,
        sentiment_backend,
        sentiment_api_token,
        sentiment_model_url,
        sentiment_loading_retry_secs,
        http_timeout_secs,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BRANDPULSE_ENV".to_string(),
            reason: format!("expected development, test or production; got '{other}'"),
        }),
    }
}

fn parse_news_backend(s: &str) -> Result<NewsBackend, ConfigError> {
    match s.to_ascii_lowercase().as_str() {
        "gnews" => Ok(NewsBackend::GNews),
        "gdelt" => Ok(NewsBackend::Gdelt),
        other => Err(ConfigError::InvalidEnvVar {
            var: "NEWS_BACKEND".to_string(),
            reason: format!("expected gnews or gdelt; got '{other}'"),
        }),
    }
}

fn parse_sentiment_backend(s: &str) -> Result<SentimentBackend, ConfigError> {
    match s.to_ascii_lowercase().as_str() {
        "lexicon" => Ok(SentimentBackend::Lexicon),
        "remote" => Ok(SentimentBackend::Remote),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SENTIMENT_BACKEND".to_string(),
            reason: format!("expected lexicon or remote; got '{other}'"),
        }),
    }
}

/// Split a comma-separated origin list, dropping blanks and trailing slashes.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.trim_end_matches('/').to_string())
        .collect()
}

/// Returns `true` for names safe to splice into SQL unquoted:
/// ASCII letter or underscore first, then letters, digits or underscores,
/// at most 63 bytes (the Postgres identifier limit).
#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    name.len() <= 63
        && (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
