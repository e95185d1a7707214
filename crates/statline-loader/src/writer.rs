//! The upsert writer: subject first, then the stat row, each step in its own
//! store transaction.

use std::collections::HashSet;

use statline_core::{
  normalize::NormalizedRecord,
  store::{StatStore, SubjectInsert},
  subject::SubjectId,
};
use tracing::{debug, info, warn};

/// What happened in the subject step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectStep {
  Created,
  AlreadyPresent,
  /// Already confirmed earlier in this run; no statement issued.
  Cached,
  Failed,
}

/// What happened in the stat step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatStep {
  Inserted { stat_id: i64 },
  Failed,
  /// Not attempted because the subject step failed.
  Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordOutcome {
  pub subject: SubjectStep,
  pub stat:    StatStep,
}

/// Writes normalized records one at a time.
///
/// Holds the ids confirmed present during this run so repeated ids skip the
/// subject statement. Build a new writer per run; nothing carries over.
pub struct UpsertWriter<'s, S> {
  store: &'s S,
  seen:  HashSet<SubjectId>,
}

impl<'s, S: StatStore> UpsertWriter<'s, S> {
  pub fn new(store: &'s S) -> Self { Self { store, seen: HashSet::new() } }

  /// Write one record. Storage failures are logged and reported in the
  /// outcome, never returned.
  pub async fn write(&mut self, record: &NormalizedRecord) -> RecordOutcome {
    let subject = self.ensure_subject(record).await;
    if subject == SubjectStep::Failed {
      warn!(subject_id = %record.subject_id, "skipping stat row; subject was not stored");
      return RecordOutcome { subject, stat: StatStep::Skipped };
    }

    let new_stat = &record.stat;
    let stat = match self.store.append_stat(new_stat.clone()).await {
      Ok(row) => {
        info!(
          subject_id = %record.subject_id,
          season = new_stat.season,
          team = %new_stat.team,
          stat_id = row.stat_id,
          "inserted stats"
        );
        StatStep::Inserted { stat_id: row.stat_id }
      }
      Err(e) => {
        warn!(
          subject_id = %record.subject_id,
          season = new_stat.season,
          team = %new_stat.team,
          error = %e,
          "failed to insert stats"
        );
        StatStep::Failed
      }
    };

    RecordOutcome { subject, stat }
  }

  async fn ensure_subject(&mut self, record: &NormalizedRecord) -> SubjectStep {
    if self.seen.contains(&record.subject_id) {
      return SubjectStep::Cached;
    }

    match self.store.insert_subject_if_absent(record.new_subject()).await {
      Ok(SubjectInsert::Created) => {
        info!(
          subject_id = %record.subject_id,
          name = %record.display_name,
          "inserted new subject"
        );
        self.seen.insert(record.subject_id.clone());
        SubjectStep::Created
      }
      Ok(SubjectInsert::AlreadyPresent) => {
        debug!(subject_id = %record.subject_id, "subject already present");
        self.seen.insert(record.subject_id.clone());
        SubjectStep::AlreadyPresent
      }
      Err(e) => {
        warn!(
          subject_id = %record.subject_id,
          name = %record.display_name,
          error = %e,
          "failed to insert subject"
        );
        SubjectStep::Failed
      }
    }
  }
}
