//! Postgres-backed [`MentionStore`].

use async_trait::async_trait;
use brandpulse_core::{
    is_valid_identifier, AnnotatedMention, Mention, MentionSource, MentionStore, Sentiment,
    SentimentLabel, StoreError, StoredMention,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the mentions table, as selected by the recency query.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MentionRow {
    pub public_id: Uuid,
    pub source: String,
    pub source_name: String,
    pub title: String,
    pub body: String,
    pub url: String,
    pub published_at: String,
    pub sentiment_label: String,
    pub sentiment_score: f64,
}

impl From<MentionRow> for StoredMention {
    fn from(row: MentionRow) -> Self {
        let mention = Mention {
            source: MentionSource::parse(&row.source).unwrap_or(MentionSource::News),
            source_name: row.source_name,
            title: row.title,
            text: row.body,
            url: row.url,
            published_at: row.published_at,
        };
        StoredMention {
            id: row.public_id.to_string(),
            mention: mention.annotate(Sentiment::new(
                SentimentLabel::parse(&row.sentiment_label),
                row.sentiment_score,
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Mention store over a Postgres table.
///
/// Deduplication is enforced by the table's `UNIQUE (url)` constraint:
/// inserts use `ON CONFLICT (url) DO NOTHING`, so two concurrent saves of
/// the same URL produce exactly one row and one `true`.
#[derive(Debug, Clone)]
pub struct PgMentionStore {
    pool: PgPool,
    table: String,
    insert_sql: String,
    recent_sql: String,
}

impl PgMentionStore {
    /// Build a store over `table`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::InvalidTableName`] unless `table` is a plain SQL
    /// identifier; the name is spliced into query text.
    pub fn new(pool: PgPool, table: &str) -> Result<Self, DbError> {
        if !is_valid_identifier(table) {
            return Err(DbError::InvalidTableName(table.to_string()));
        }

        let insert_sql = format!(
            "INSERT INTO {table} \
                 (public_id, source, source_name, title, body, url, published_at, \
                  sentiment_label, sentiment_score) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             ON CONFLICT (url) DO NOTHING \
             RETURNING id"
        );
        let recent_sql = format!(
            "SELECT public_id, source, source_name, title, body, url, published_at, \
                    sentiment_label, sentiment_score \
             FROM {table} \
             ORDER BY published_at COLLATE \"C\" DESC, id DESC \
             LIMIT $1"
        );

        Ok(Self {
            pool,
            table: table.to_string(),
            insert_sql,
            recent_sql,
        })
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Create the configured table and its recency index if they do not exist.
    ///
    /// The default `mentions` table already comes from migrations; this covers
    /// deployments that point `MENTIONS_TABLE` elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] if the DDL fails.
    pub async fn ensure_table(&self) -> Result<(), DbError> {
        let table = &self.table;
        let create = format!(
            "CREATE TABLE IF NOT EXISTS {table} ( \
                 id BIGSERIAL PRIMARY KEY, \
                 public_id UUID NOT NULL UNIQUE, \
                 source TEXT NOT NULL, \
                 source_name TEXT NOT NULL DEFAULT '', \
                 title TEXT NOT NULL DEFAULT '', \
                 body TEXT NOT NULL DEFAULT '', \
                 url TEXT NOT NULL UNIQUE, \
                 published_at TEXT NOT NULL, \
                 sentiment_label TEXT NOT NULL \
                     CHECK (sentiment_label IN ('Positive', 'Negative', 'Neutral', 'Error', 'Unknown')), \
                 sentiment_score DOUBLE PRECISION NOT NULL, \
                 created_at TIMESTAMPTZ NOT NULL DEFAULT NOW() \
             )"
        );
        let index = format!(
            "CREATE INDEX IF NOT EXISTS {table}_published_at_idx \
             ON {table} (published_at COLLATE \"C\" DESC, id DESC)"
        );

        sqlx::query(&create).execute(&self.pool).await?;
        sqlx::query(&index).execute(&self.pool).await?;
        Ok(())
    }

    /// Insert a mention unless its URL is already stored.
    ///
    /// Returns `true` if a row was inserted.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] if the insert fails.
    pub async fn insert_if_absent(&self, mention: &AnnotatedMention) -> Result<bool, DbError> {
        let m = &mention.mention;
        let inserted: Option<i64> = sqlx::query_scalar(&self.insert_sql)
            .bind(Uuid::new_v4())
            .bind(m.source.as_str())
            .bind(&m.source_name)
            .bind(&m.title)
            .bind(&m.text)
            .bind(&m.url)
            .bind(&m.published_at)
            .bind(mention.sentiment.label.as_str())
            .bind(mention.sentiment.score)
            .fetch_optional(&self.pool)
            .await?;

        Ok(inserted.is_some())
    }

    /// List the most recent mentions by `published_at` descending.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] if the query fails.
    pub async fn list_recent(&self, limit: usize) -> Result<Vec<MentionRow>, DbError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, MentionRow>(&self.recent_sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[async_trait]
impl MentionStore for PgMentionStore {
    async fn save_mention(&self, mention: &AnnotatedMention) -> Result<bool, StoreError> {
        Ok(self.insert_if_absent(mention).await?)
    }

    async fn get_recent_mentions(&self, limit: usize) -> Result<Vec<StoredMention>, StoreError> {
        let rows = self.list_recent(limit).await?;
        Ok(rows.into_iter().map(StoredMention::from).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
