//! The pipeline driver: schema → source → normalize → write, in that order.

use std::path::Path;

use statline_core::{
  field::PLAYER_NAME,
  normalize::{NormalizeOptions, Normalizer},
  store::{IntegrityReport, StatStore},
};
use tracing::{debug, error, info, warn};

use crate::{
  Error, Result,
  source::{self, SourceTable},
  writer::{RecordOutcome, StatStep, SubjectStep, UpsertWriter},
};

/// Counters for one completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
  pub rows_read:         usize,
  /// Rows dropped as unreadable or without a usable name.
  pub rows_dropped:      usize,
  pub subjects_created:  usize,
  /// Subject steps that found the id already stored, including ids seen
  /// earlier in the same run.
  pub subjects_existing: usize,
  pub subject_failures:  usize,
  pub stats_inserted:    usize,
  pub stat_failures:     usize,
  pub integrity:         IntegrityReport,
}

impl LoadReport {
  fn tally(&mut self, outcome: RecordOutcome) {
    match outcome.subject {
      SubjectStep::Created => self.subjects_created += 1,
      SubjectStep::AlreadyPresent | SubjectStep::Cached => self.subjects_existing += 1,
      SubjectStep::Failed => self.subject_failures += 1,
    }
    match outcome.stat {
      StatStep::Inserted { .. } => self.stats_inserted += 1,
      StatStep::Failed => self.stat_failures += 1,
      StatStep::Skipped => {}
    }
  }
}

/// How a run ended, short of a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
  Completed(LoadReport),
  /// Nothing survived normalization; no rows were written.
  NoValidRecords { rows_read: usize, rows_dropped: usize },
}

/// Run the whole pipeline against the CSV at `source`.
pub async fn run<S: StatStore>(
  store: &S,
  source: &Path,
  options: NormalizeOptions,
) -> Result<LoadOutcome> {
  let schema = store.ensure_schema().await.map_err(Error::store)?;
  for table in &schema.created {
    info!(%table, "created table");
  }
  if !schema.existing.is_empty() {
    debug!(tables = ?schema.existing, "tables already present");
  }

  let table = source::read_path(source)?;
  info!(rows = table.rows.len(), path = %source.display(), "loaded source table");

  load_table(store, &table, options).await
}

/// Normalize and write an already-read source table. The schema must exist.
pub async fn load_table<S: StatStore>(
  store: &S,
  table: &SourceTable,
  options: NormalizeOptions,
) -> Result<LoadOutcome> {
  let normalizer = Normalizer::for_headers(table.headers.as_slice(), options);
  if let Some(season) = normalizer.injected_season() {
    warn!(season, "source has no season column; assuming the configured default");
  }
  if !table.has_column(&PLAYER_NAME) {
    warn!(header = PLAYER_NAME.header, "source has no player name column; every row will be dropped");
  }

  let batch = normalizer.normalize_batch(&table.rows);
  for (idx, reason) in &batch.dropped {
    warn!(row = idx + 1, %reason, "dropped row");
  }

  let rows_read = table.rows.len() + table.skipped;
  let rows_dropped = batch.dropped.len() + table.skipped;

  if batch.records.is_empty() {
    warn!(rows_read, "no valid records to load after cleaning");
    return Ok(LoadOutcome::NoValidRecords { rows_read, rows_dropped });
  }

  let mut report = LoadReport { rows_read, rows_dropped, ..Default::default() };
  let mut writer = UpsertWriter::new(store);
  for record in &batch.records {
    let outcome = writer.write(record).await;
    report.tally(outcome);
  }

  report.integrity = store.integrity().await.map_err(Error::store)?;
  if report.integrity.orphaned_stats > 0 {
    error!(
      orphaned = report.integrity.orphaned_stats,
      "stat rows reference missing subjects"
    );
  }

  Ok(LoadOutcome::Completed(report))
}
