use super::*;
use brandpulse_core::{Mention, MentionSource, Sentiment, SentimentLabel, StoredMention};

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["brandpulse-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_fetch_with_brand() {
    let cli = Cli::try_parse_from(["brandpulse-cli", "fetch", "Acme Corp"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Fetch { ref brand, dry_run: false }) if brand == "Acme Corp"
    ));
}

#[test]
fn parses_fetch_dry_run() {
    let cli = Cli::try_parse_from(["brandpulse-cli", "fetch", "Acme", "--dry-run"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Fetch { dry_run: true, .. })
    ));
}

#[test]
fn fetch_requires_brand() {
    assert!(Cli::try_parse_from(["brandpulse-cli", "fetch"]).is_err());
}

#[test]
fn recent_defaults_to_store_limit() {
    let cli = Cli::try_parse_from(["brandpulse-cli", "recent"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Recent { limit: 50, json: false })
    ));
}

#[test]
fn recent_with_limit_and_json() {
    let cli = Cli::try_parse_from(["brandpulse-cli", "recent", "--limit", "5", "--json"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Recent { limit: 5, json: true })
    ));
}

#[test]
fn recent_rejects_negative_limit() {
    assert!(Cli::try_parse_from(["brandpulse-cli", "recent", "--limit", "-1"]).is_err());
}

#[test]
fn format_row_shows_label_score_and_title() {
    let row = StoredMention {
        id: "1".to_string(),
        mention: Mention {
            source: MentionSource::News,
            source_name: String::new(),
            title: "Acme wins award".to_string(),
            text: String::new(),
            url: "https://x.test/a".to_string(),
            published_at: "2025-03-01T00:00:00Z".to_string(),
        }
        .annotate(Sentiment::new(SentimentLabel::Positive, 0.5)),
    };

    let line = mentions::format_row(&row);
    assert!(line.starts_with("2025-03-01T00:00:00Z"));
    assert!(line.contains("Positive"));
    assert!(line.contains("+0.500"));
    assert!(line.contains(" - "));
    assert!(line.ends_with("Acme wins award"));
}

#[test]
fn failed_save_note_only_when_saves_failed() {
    let clean = brandpulse_sentiment::IngestionSummary {
        fetched: 3,
        new_mentions_count: 3,
        ..brandpulse_sentiment::IngestionSummary::empty("Acme")
    };
    assert!(mentions::failed_save_note(&clean).is_none());

    let partial = brandpulse_sentiment::IngestionSummary {
        failed_saves: 2,
        ..clean
    };
    assert_eq!(
        mentions::failed_save_note(&partial).as_deref(),
        Some("warning: 2 of 3 mentions could not be saved")
    );
}
