//! The `StatStore` trait and the reports its operations return.
//!
//! The trait is implemented by storage backends (e.g.
//! `statline-store-sqlite`). The loader and the read API depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use serde::Serialize;

use crate::{
  stat::{NewSeasonStat, SeasonStat, SubjectSeasonStat},
  subject::{NewSubject, Subject, SubjectId},
};

// ─── Reports ─────────────────────────────────────────────────────────────────

/// Result of [`StatStore::ensure_schema`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaReport {
  /// Tables that did not exist and were created by this call.
  pub created:  Vec<String>,
  /// Tables that were already present and left untouched.
  pub existing: Vec<String>,
}

/// Result of [`StatStore::insert_subject_if_absent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectInsert {
  Created,
  AlreadyPresent,
}

/// Result of [`StatStore::integrity`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
  /// Stat rows whose subject does not exist. Always zero while foreign keys
  /// are enforced.
  pub orphaned_stats:         u64,
  /// Subjects with no stat rows, left behind when a stat insert failed.
  pub subjects_without_stats: u64,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a statline store backend.
///
/// Subjects are insert-if-absent and never updated. Stat rows are
/// append-only with no duplicate check.
pub trait StatStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Schema ────────────────────────────────────────────────────────────

  /// Create the subject and stat relations if they are missing. Safe to
  /// call on every run; never alters existing tables or rows.
  fn ensure_schema(&self) -> impl Future<Output = Result<SchemaReport, Self::Error>> + Send + '_;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Insert `subject` unless a subject with the same id exists, as one
  /// atomic statement. An existing subject is never modified.
  fn insert_subject_if_absent(
    &self,
    subject: NewSubject,
  ) -> impl Future<Output = Result<SubjectInsert, Self::Error>> + Send + '_;

  /// Append a stat row. No existence check is made against earlier rows.
  fn append_stat(
    &self,
    stat: NewSeasonStat,
  ) -> impl Future<Output = Result<SeasonStat, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  fn get_subject<'a>(
    &'a self,
    id: &'a SubjectId,
  ) -> impl Future<Output = Result<Option<Subject>, Self::Error>> + Send + 'a;

  fn list_subjects(&self) -> impl Future<Output = Result<Vec<Subject>, Self::Error>> + Send + '_;

  /// Every stat row for one subject in one season, oldest insertion first.
  fn subject_season_stats<'a>(
    &'a self,
    id: &'a SubjectId,
    season: i32,
  ) -> impl Future<Output = Result<Vec<SubjectSeasonStat>, Self::Error>> + Send + 'a;

  /// Every stat row of a season, in insertion order.
  fn season_stats(
    &self,
    season: i32,
  ) -> impl Future<Output = Result<Vec<SubjectSeasonStat>, Self::Error>> + Send + '_;

  /// Count rows that break, or merely bend, the subject/stat relationship.
  fn integrity(&self) -> impl Future<Output = Result<IntegrityReport, Self::Error>> + Send + '_;
}
