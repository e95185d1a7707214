//! [`SqliteStore`]: the SQLite implementation of [`StatStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use statline_core::{
  stat::{NewSeasonStat, SeasonStat, SubjectSeasonStat},
  store::{IntegrityReport, SchemaReport, StatStore, SubjectInsert},
  subject::{NewSubject, Subject, SubjectId},
};

use crate::{
  Result,
  encode::{RawSeasonStat, RawSubject, STAT_INSERT, STAT_SELECT, SUBJECT_SELECT},
  schema::{CONNECTION_PRAGMAS, SCHEMA, TABLES, existing_tables},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A statline store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. Every write
/// runs in its own transaction, so a failed statement rolls back alone.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path`. Call
  /// [`StatStore::ensure_schema`] before writing.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.configure().await?;
    Ok(store)
  }

  /// Open an in-memory store with the schema already in place, for
  /// testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.configure().await?;
    store.ensure_schema().await?;
    Ok(store)
  }

  async fn configure(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(CONNECTION_PRAGMAS)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn query_stats(
    &self,
    filter: &'static str,
    subject_id: Option<String>,
    season: i32,
  ) -> Result<Vec<SubjectSeasonStat>> {
    let raws: Vec<RawSeasonStat> = self
      .conn
      .call(move |conn| {
        let sql = format!("{STAT_SELECT} {filter} ORDER BY s.stat_id");
        let mut stmt = conn.prepare(&sql)?;
        let rows = match subject_id {
          Some(id) => stmt
            .query_map(rusqlite::params![id, season], RawSeasonStat::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
          None => stmt
            .query_map(rusqlite::params![season], RawSeasonStat::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSeasonStat::into_subject_stat).collect()
  }
}

// ─── StatStore impl ──────────────────────────────────────────────────────────

impl StatStore for SqliteStore {
  type Error = crate::Error;

  // ── Schema ────────────────────────────────────────────────────────────────

  async fn ensure_schema(&self) -> Result<SchemaReport> {
    let existing = self
      .conn
      .call(|conn| {
        let existing = existing_tables(conn)?;
        conn.execute_batch(SCHEMA)?;
        Ok(existing)
      })
      .await?;

    let created = TABLES
      .iter()
      .filter(|t| !existing.iter().any(|e| e == *t))
      .map(|t| (*t).to_owned())
      .collect();

    Ok(SchemaReport { created, existing })
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn insert_subject_if_absent(&self, subject: NewSubject) -> Result<SubjectInsert> {
    let id_str = String::from(subject.subject_id);
    let name = subject.display_name;

    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let n = tx.execute(
          "INSERT INTO subjects (subject_id, display_name, primary_position, debut_year)
           VALUES (?1, ?2, NULL, NULL)
           ON CONFLICT (subject_id) DO NOTHING",
          rusqlite::params![id_str, name],
        )?;
        tx.commit()?;
        Ok(n)
      })
      .await?;

    Ok(if inserted == 0 {
      SubjectInsert::AlreadyPresent
    } else {
      SubjectInsert::Created
    })
  }

  async fn append_stat(&self, stat: NewSeasonStat) -> Result<SeasonStat> {
    let row = stat.clone();

    let stat_id = self
      .conn
      .call(move |conn| {
        let l = &row.line;
        let tx = conn.transaction()?;
        tx.execute(
          STAT_INSERT,
          rusqlite::params![
            row.subject_id.as_str(),
            row.season,
            row.team,
            row.league,
            row.position_played,
            l.games_played,
            l.plate_appearances,
            l.at_bats,
            l.runs,
            l.hits,
            l.doubles,
            l.triples,
            l.home_runs,
            l.rbi,
            l.stolen_bases,
            l.caught_stealing,
            l.walks,
            l.strikeouts,
            l.batting_average,
            l.obp,
            l.slg,
            l.ops,
            l.ops_plus,
            l.roba,
            l.rbat_plus,
            l.total_bases,
            l.gidp,
            l.hit_by_pitch,
            l.sac_hits,
            l.sac_flies,
            l.intentional_walks,
            l.war,
          ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
      })
      .await?;

    Ok(SeasonStat { stat_id, stat })
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn get_subject<'a>(&'a self, id: &'a SubjectId) -> Result<Option<Subject>> {
    let id_str = id.as_str().to_owned();

    let raw: Option<RawSubject> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("{SUBJECT_SELECT} WHERE subject_id = ?1"),
            rusqlite::params![id_str],
            RawSubject::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawSubject::into_subject).transpose()
  }

  async fn list_subjects(&self) -> Result<Vec<Subject>> {
    let raws: Vec<RawSubject> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!("{SUBJECT_SELECT} ORDER BY subject_id"))?;
        let rows = stmt
          .query_map([], RawSubject::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSubject::into_subject).collect()
  }

  async fn subject_season_stats<'a>(
    &'a self,
    id: &'a SubjectId,
    season: i32,
  ) -> Result<Vec<SubjectSeasonStat>> {
    self
      .query_stats(
        "WHERE s.subject_id = ?1 AND s.season = ?2",
        Some(id.as_str().to_owned()),
        season,
      )
      .await
  }

  async fn season_stats(&self, season: i32) -> Result<Vec<SubjectSeasonStat>> {
    self.query_stats("WHERE s.season = ?1", None, season).await
  }

  async fn integrity(&self) -> Result<IntegrityReport> {
    let (orphaned, childless): (i64, i64) = self
      .conn
      .call(|conn| {
        let orphaned = conn.query_row(
          "SELECT COUNT(*) FROM season_stats s
           LEFT JOIN subjects p ON p.subject_id = s.subject_id
           WHERE p.subject_id IS NULL",
          [],
          |r| r.get(0),
        )?;
        let childless = conn.query_row(
          "SELECT COUNT(*) FROM subjects p
           WHERE NOT EXISTS (SELECT 1 FROM season_stats s WHERE s.subject_id = p.subject_id)",
          [],
          |r| r.get(0),
        )?;
        Ok((orphaned, childless))
      })
      .await?;

    Ok(IntegrityReport {
      orphaned_stats:         orphaned.max(0) as u64,
      subjects_without_stats: childless.max(0) as u64,
    })
  }
}
