use anyhow::{Context, Result};
use clap::Parser;
use hubcore::persist::SnapshotStore;
use report::{render_report, TagLinks};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "report")]
#[command(about = "Render the latest snapshot as the static index.html report")]
struct Cli {
    /// Directory containing snapshot files
    #[arg(long, default_value = ".")]
    data_dir: String,
    /// Directory the report is written to (defaults to the data directory)
    #[arg(long)]
    out_dir: Option<String>,
    /// Rows in the trending table
    #[arg(long, default_value_t = 10)]
    top_n: usize,
    /// Also write a dated report_<date>.html copy
    #[arg(long, default_value_t = false)]
    archive_copy: bool,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Cli::parse();

    let store = SnapshotStore::new(&args.data_dir);
    let snapshot = store
        .load_latest()
        .context("no latest snapshot; run the collector first")?;
    let mut archive = store.archive_dates()?;
    if archive.len() > 7 {
        archive = archive.split_off(archive.len() - 7);
    }

    let links = TagLinks::default();
    let html = render_report(&snapshot, &archive, &links, args.top_n);

    let out_dir = PathBuf::from(args.out_dir.clone().unwrap_or_else(|| args.data_dir.clone()));
    fs::create_dir_all(&out_dir)?;
    let index = out_dir.join("index.html");
    fs::write(&index, &html).with_context(|| format!("writing {}", index.display()))?;
    tracing::info!(path = %index.display(), "report written");

    if args.archive_copy {
        let dated = out_dir.join(format!("report_{}.html", snapshot.date));
        fs::write(&dated, &html).with_context(|| format!("writing {}", dated.display()))?;
        tracing::info!(path = %dated.display(), "archive copy written");
    }
    Ok(())
}
