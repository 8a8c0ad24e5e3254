//! Live integration tests for brandpulse-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. The `migrations` path is relative to the crate root
//! (`crates/brandpulse-db/`), so `"../../migrations"` resolves to the workspace
//! migration directory.

use brandpulse_core::{
    AnnotatedMention, Mention, MentionSource, MentionStore, Sentiment, SentimentLabel,
};
use brandpulse_db::PgMentionStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn annotated(url: &str, published_at: &str, label: SentimentLabel) -> AnnotatedMention {
    Mention {
        source: MentionSource::News,
        source_name: "Associated Press".to_string(),
        title: format!("Story at {url}"),
        text: "Body text.".to_string(),
        url: url.to_string(),
        published_at: published_at.to_string(),
    }
    .annotate(Sentiment::new(label, 0.25))
}

fn store(pool: sqlx::PgPool) -> PgMentionStore {
    PgMentionStore::new(pool, "mentions").expect("default table name is valid")
}

async fn count_url(pool: &sqlx::PgPool, url: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM mentions WHERE url = $1")
        .bind(url)
        .fetch_one(pool)
        .await
        .unwrap_or_else(|e| panic!("count for '{url}' failed: {e}"))
}

// ---------------------------------------------------------------------------
// save_mention
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn save_mention_inserts_once_per_url(pool: sqlx::PgPool) {
    let store = store(pool.clone());
    let m = annotated("https://example.com/a", "2025-01-01T00:00:00Z", SentimentLabel::Positive);

    assert!(store.save_mention(&m).await.expect("first save"));
    assert!(!store.save_mention(&m).await.expect("second save"));
    assert_eq!(count_url(&pool, "https://example.com/a").await, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn duplicate_url_with_different_content_is_ignored(pool: sqlx::PgPool) {
    let store = store(pool.clone());
    let first = annotated("https://example.com/b", "2025-01-01T00:00:00Z", SentimentLabel::Positive);
    let mut second = annotated("https://example.com/b", "2025-06-01T00:00:00Z", SentimentLabel::Negative);
    second.mention.title = "Rewritten headline".to_string();

    assert!(store.save_mention(&first).await.unwrap());
    assert!(!store.save_mention(&second).await.unwrap());

    let recent = store.get_recent_mentions(10).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].mention.sentiment.label, SentimentLabel::Positive);
    assert_eq!(recent[0].mention.mention.published_at, "2025-01-01T00:00:00Z");
}

#[sqlx::test(migrations = "../../migrations")]
async fn concurrent_saves_of_same_url_store_one_row(pool: sqlx::PgPool) {
    let store = store(pool.clone());
    let m = annotated("https://example.com/race", "2025-01-01T00:00:00Z", SentimentLabel::Neutral);

    let (a, b) = tokio::join!(store.save_mention(&m), store.save_mention(&m));
    let inserted = [a.unwrap(), b.unwrap()];

    assert_eq!(inserted.iter().filter(|x| **x).count(), 1);
    assert_eq!(count_url(&pool, "https://example.com/race").await, 1);
}

// ---------------------------------------------------------------------------
// get_recent_mentions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn recent_mentions_are_sorted_and_limited(pool: sqlx::PgPool) {
    let store = store(pool);
    for (url, ts) in [
        ("https://example.com/1", "2025-01-02T00:00:00Z"),
        ("https://example.com/2", "2025-01-05T00:00:00Z"),
        ("https://example.com/3", "2025-01-01T00:00:00Z"),
        ("https://example.com/4", "2025-01-04T00:00:00Z"),
        ("https://example.com/5", "2025-01-03T00:00:00Z"),
    ] {
        store
            .save_mention(&annotated(url, ts, SentimentLabel::Neutral))
            .await
            .unwrap();
    }

    let recent = store.get_recent_mentions(3).await.unwrap();
    assert_eq!(recent.len(), 3);
    let stamps: Vec<&str> = recent
        .iter()
        .map(|r| r.mention.mention.published_at.as_str())
        .collect();
    assert_eq!(
        stamps,
        vec![
            "2025-01-05T00:00:00Z",
            "2025-01-04T00:00:00Z",
            "2025-01-03T00:00:00Z"
        ]
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn recent_mentions_render_ids_as_strings(pool: sqlx::PgPool) {
    let store = store(pool);
    store
        .save_mention(&annotated("https://example.com/id", "2025-01-01", SentimentLabel::Error))
        .await
        .unwrap();

    let recent = store.get_recent_mentions(1).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert!(uuid::Uuid::parse_str(&recent[0].id).is_ok());
    assert_eq!(recent[0].mention.sentiment.label, SentimentLabel::Error);
}

#[sqlx::test(migrations = "../../migrations")]
async fn recent_mentions_zero_limit_is_empty(pool: sqlx::PgPool) {
    let store = store(pool);
    store
        .save_mention(&annotated("https://example.com/z", "2025-01-01", SentimentLabel::Neutral))
        .await
        .unwrap();
    assert!(store.get_recent_mentions(0).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn ensure_table_creates_custom_table(pool: sqlx::PgPool) {
    let store = PgMentionStore::new(pool, "mentions_staging").expect("valid name");
    store.ensure_table().await.expect("create table");
    // Idempotent.
    store.ensure_table().await.expect("second create");

    let m = annotated("https://example.com/staging", "2025-01-01", SentimentLabel::Neutral);
    assert!(store.save_mention(&m).await.unwrap());
    assert!(!store.save_mention(&m).await.unwrap());
    assert_eq!(store.get_recent_mentions(10).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn ping_succeeds_on_live_pool(pool: sqlx::PgPool) {
    let store = store(pool);
    store.ping().await.expect("ping");
}
