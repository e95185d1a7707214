//! Batch loader: reads a season-batting CSV and writes it into a
//! [`StatStore`](statline_core::store::StatStore).
//!
//! The run is strictly sequential. Schema first, then the whole source table
//! is read and normalized, then each record goes through the
//! [`UpsertWriter`](writer::UpsertWriter) in source order.

pub mod error;
pub mod pipeline;
pub mod source;
pub mod writer;

use std::path::PathBuf;

use serde::Deserialize;
use statline_core::normalize::NormalizeOptions;

pub use error::{Error, Result};
pub use pipeline::{LoadOutcome, LoadReport, load_table, run};

/// Season assumed when neither the source nor the configuration gives one.
pub const DEFAULT_SEASON: i32 = 2023;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Loader configuration, deserialised from `statline.toml`, `STATLINE_*`
/// environment variables and command-line overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct LoaderConfig {
  /// CSV file to load.
  pub source_path:    PathBuf,
  /// SQLite database file; created if missing.
  pub store_path:     PathBuf,
  /// Season injected into every row when the source has no season column.
  #[serde(default = "default_season")]
  pub default_season: i32,
}

fn default_season() -> i32 { DEFAULT_SEASON }

impl LoaderConfig {
  pub fn normalize_options(&self) -> NormalizeOptions {
    NormalizeOptions { default_season: self.default_season }
  }
}

#[cfg(test)]
mod tests;
