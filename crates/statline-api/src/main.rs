//! `statline-api`: serve a statline store over read-only HTTP.
//!
//! Reads `statline.toml` (or the path given with `--config`), then
//! `STATLINE_*` environment variables. The schema is ensured on startup so
//! the server can run before the first load.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use statline_api::{DEFAULT_ALLOWED_ORIGINS, ServerConfig};
use statline_core::store::StatStore;
use statline_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Statline read-only API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "statline.toml")]
  config: PathBuf,
}

#[tokio::main]
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
    .set_default("host", "127.0.0.1")?
    .set_default("port", 5000)?
    .set_default("store_path", "statline.db")?
    .set_default("allowed_origins", DEFAULT_ALLOWED_ORIGINS)?
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("STATLINE"))
    .build()
    .context("failed to read configuration")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store = SqliteStore::open(&server_cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", server_cfg.store_path))?;
  store
    .ensure_schema()
    .await
    .context("failed to prepare schema")?;

  let app = statline_api::app(Arc::new(store), &server_cfg.allowed_origins);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
