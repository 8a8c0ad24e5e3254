//! `fetch` and `recent` command handlers.

use std::sync::Arc;

use brandpulse_core::{AppConfig, MemoryMentionStore, MentionStore, StoredMention};
use brandpulse_db::{PgMentionStore, PoolConfig};
use brandpulse_sentiment::{
    build_classifier, build_source_client, IngestionPipeline, IngestionSummary,
};

/// Open the configured Postgres store, applying migrations first.
async fn open_store(config: &AppConfig) -> anyhow::Result<PgMentionStore> {
    let pool = brandpulse_db::connect_pool(
        &config.database_url,
        config.database_name.as_deref(),
        PoolConfig::from_app_config(config),
    )
    .await?;
    brandpulse_db::run_migrations(&pool).await?;

    let store = PgMentionStore::new(pool, &config.mentions_table)?;
    store.ensure_table().await?;
    Ok(store)
}

/// Run one ingestion for `brand` and print the summary message.
///
/// With `dry_run` the mentions go to an in-memory store and are printed
/// instead of persisted; the database is never contacted.
///
/// # Errors
///
/// Returns an error if the database, news client or classifier cannot be set up.
pub(crate) async fn run_fetch(config: &AppConfig, brand: &str, dry_run: bool) -> anyhow::Result<()> {
    let source = build_source_client(config)?;
    let classifier = build_classifier(config)?;

    if dry_run {
        let store = Arc::new(MemoryMentionStore::new());
        let pipeline = IngestionPipeline::new(source, classifier, store.clone());
        let summary = pipeline.run(brand).await;
        println!("dry-run: {}", summary.message());
        for row in store.get_recent_mentions(usize::MAX).await? {
            println!("{}", format_row(&row));
        }
        return Ok(());
    }

    let store: Arc<dyn MentionStore> = Arc::new(open_store(config).await?);
    let pipeline = IngestionPipeline::new(source, classifier, store);
    let summary = pipeline.run(brand).await;

    tracing::info!(
        brand,
        fetched = summary.fetched,
        new = summary.new_mentions_count,
        failed = summary.failed_saves,
        "fetch finished"
    );
    println!("{}", summary.message());
    if let Some(note) = failed_save_note(&summary) {
        tracing::warn!(brand, failed = summary.failed_saves, "some mentions were not saved");
        println!("{note}");
    }
    Ok(())
}

/// Warning line for a run where some saves failed.
pub(crate) fn failed_save_note(summary: &IngestionSummary) -> Option<String> {
    (summary.failed_saves > 0).then(|| {
        format!(
            "warning: {} of {} mentions could not be saved",
            summary.failed_saves, summary.fetched
        )
    })
}

/// Print up to `limit` stored mentions, newest first.
///
/// # Errors
///
/// Returns an error if the database cannot be reached.
pub(crate) async fn run_recent(config: &AppConfig, limit: usize, json: bool) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let rows = store.get_recent_mentions(limit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("no mentions stored");
        return Ok(());
    }
    for row in &rows {
        println!("{}", format_row(row));
    }
    Ok(())
}

/// One table line: timestamp, label, score, publisher, title.
pub(crate) fn format_row(row: &StoredMention) -> String {
    let m = &row.mention.mention;
    let s = &row.mention.sentiment;
    let publisher = if m.source_name.is_empty() {
        "-"
    } else {
        m.source_name.as_str()
    };
    format!(
        "{:<25} {:<8} {:>+7.3}  {:<20} {}",
        m.published_at,
        s.label.as_str(),
        s.score,
        publisher,
        m.title
    )
}
