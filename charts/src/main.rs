mod render;
mod trend;

use anyhow::Result;
use clap::Parser;
use hubcore::persist::SnapshotStore;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "charts")]
#[command(about = "Render PNG charts from the latest (or an archived) snapshot")]
struct Cli {
    /// Directory containing snapshot files
    #[arg(long, default_value = ".")]
    data_dir: String,
    /// Directory chart images are written to (defaults to the data directory)
    #[arg(long)]
    out_dir: Option<String>,
    /// How many archived snapshots feed the trend chart
    #[arg(long, default_value_t = 30)]
    history: usize,
    /// Render an archived date instead of latest.json
    #[arg(long)]
    date: Option<String>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Cli::parse();

    let store = SnapshotStore::new(&args.data_dir);
    let snapshot = match &args.date {
        Some(date) => store.load_date(date)?,
        None => store.load_latest()?,
    };

    let out_dir = PathBuf::from(args.out_dir.clone().unwrap_or_else(|| args.data_dir.clone()));
    fs::create_dir_all(&out_dir)?;

    let mut outputs = Vec::new();
    for rendered in [
        render::leaderboard(&snapshot, &out_dir)?,
        render::tech_distribution(&snapshot, &out_dir)?,
        render::bubble_chart(&snapshot, &out_dir)?,
        render::org_ranking(&snapshot, &out_dir)?,
        render::wordcloud(&snapshot, &out_dir)?,
    ] {
        if let Some(path) = rendered {
            outputs.push(path);
        }
    }

    let history = store.load_history(args.history)?;
    let table = trend::pivot_categories(&history);
    if let Some(path) = render::trend_chart(&table, &snapshot.date, &out_dir)? {
        outputs.push(path);
    }

    tracing::info!(count = outputs.len(), date = %snapshot.date, "charts rendered");
    for path in &outputs {
        tracing::info!(path = %path.display(), "chart written");
    }
    Ok(())
}
