//! `statline-load`: load a season-batting CSV into a statline store.
//!
//! Reads `statline.toml` (or the path given with `--config`), then
//! `STATLINE_*` environment variables, then command-line overrides.
//!
//! ```text
//! statline-load 2025MLB_STD_Batting.csv --store stats.db --season 2025
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use statline_loader::{DEFAULT_SEASON, LoadOutcome, LoaderConfig};
use statline_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Load season batting statistics into a statline store")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "statline.toml")]
  config: PathBuf,

  /// CSV file to load; overrides `source_path`.
  source: Option<PathBuf>,

  /// SQLite database file; overrides `store_path`.
  #[arg(long)]
  store: Option<PathBuf>,

  /// Season to assume when the CSV has no season column; overrides
  /// `default_season`.
  #[arg(long)]
  season: Option<i32>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .set_default("store_path", "statline.db")?
    .set_default("default_season", i64::from(DEFAULT_SEASON))?
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("STATLINE"))
    .set_override_option("source_path", cli.source.as_deref().map(path_string))?
    .set_override_option("store_path", cli.store.as_deref().map(path_string))?
    .set_override_option("default_season", cli.season.map(i64::from))?
    .build()
    .context("failed to read configuration")?;

  let cfg: LoaderConfig = settings
    .try_deserialize()
    .context("failed to deserialise LoaderConfig")?;

  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;

  let outcome = statline_loader::run(&store, &cfg.source_path, cfg.normalize_options())
    .await
    .with_context(|| format!("failed to load {:?}", cfg.source_path))?;

  match outcome {
    LoadOutcome::Completed(report) => tracing::info!(
      rows_read = report.rows_read,
      rows_dropped = report.rows_dropped,
      subjects_created = report.subjects_created,
      subjects_existing = report.subjects_existing,
      subject_failures = report.subject_failures,
      stats_inserted = report.stats_inserted,
      stat_failures = report.stat_failures,
      subjects_without_stats = report.integrity.subjects_without_stats,
      "load complete"
    ),
    LoadOutcome::NoValidRecords { rows_read, rows_dropped } => tracing::warn!(
      rows_read,
      rows_dropped,
      "no valid player data to process after cleaning; nothing written"
    ),
  }

  Ok(())
}

fn path_string(path: &Path) -> String { path.to_string_lossy().into_owned() }
