mod hub;

use anyhow::Result;
use clap::Parser;
use hub::{HubClient, SortKey, DEFAULT_BASE_URL};
use hubcore::aggregate::{aggregate, group_by_category, merge};
use hubcore::classify::{classify, CategoryMap, SizeBuckets};
use hubcore::keywords::KeywordVocab;
use hubcore::persist::SnapshotStore;
use hubcore::{ModelRecord, Snapshot};
use std::time::Duration;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "collector")]
#[command(about = "Collect ranked model lists from the hub into a dated JSON snapshot")]
struct Cli {
    /// Directory snapshots are written to
    #[arg(long, default_value = ".")]
    data_dir: String,
    /// Records fetched per ranked view
    #[arg(long, default_value_t = 500)]
    limit: usize,
    /// Records kept per ranked view in the snapshot
    #[arg(long, default_value_t = 20)]
    keep: usize,
    /// Records kept per category group
    #[arg(long, default_value_t = 10)]
    per_category: usize,
    /// Hub base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Per-request timeout seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Cli::parse();

    let client = HubClient::new(args.base_url.clone(), Duration::from_secs(args.timeout_secs))?;
    let snapshot = collect(&client, &args).await;

    // the only fatal path: local persistence
    let store = SnapshotStore::new(&args.data_dir);
    store.save(&snapshot)?;
    tracing::info!(
        date = %snapshot.date,
        union = snapshot.statistics.tech_distribution.values().sum::<u64>(),
        organizations = snapshot.statistics.top_organizations.len(),
        keywords = snapshot.statistics.tech_keywords.len(),
        "snapshot written"
    );
    Ok(())
}

/// Fetch all three ranked views, classify, merge, aggregate. Always produces
/// a snapshot, possibly sparse, even when every fetch failed.
async fn collect(client: &HubClient, args: &Cli) -> Snapshot {
    let (trending, downloaded, liked) = tokio::join!(
        client.fetch_ranked(SortKey::Trending, args.limit),
        client.fetch_ranked(SortKey::Downloads, args.limit),
        client.fetch_ranked(SortKey::Likes, args.limit),
    );

    let categories = CategoryMap::default();
    let sizes = SizeBuckets::default();
    let vocab = KeywordVocab::default();

    let classify_all = |mut list: Vec<ModelRecord>| {
        for record in &mut list {
            classify(record, &categories, &sizes);
        }
        list
    };
    let trending = classify_all(trending);
    let downloaded = classify_all(downloaded);
    let liked = classify_all(liked);

    // merge precedence is fixed regardless of fetch completion order
    let union = merge(vec![trending.clone(), downloaded.clone(), liked.clone()]);
    let statistics = aggregate(&union, &vocab);
    let by_category = group_by_category(&union, args.per_category);

    let now = OffsetDateTime::now_utc();
    let date_format = format_description!("[year]-[month]-[day]");

    Snapshot {
        date: now.format(&date_format).unwrap_or_default(),
        timestamp: now.format(&Rfc3339).unwrap_or_default(),
        trending_models: truncated(trending, args.keep),
        most_downloaded: truncated(downloaded, args.keep),
        most_liked: truncated(liked, args.keep),
        by_category,
        statistics,
    }
}

fn truncated(mut list: Vec<ModelRecord>, keep: usize) -> Vec<ModelRecord> {
    list.truncate(keep);
    list
}
