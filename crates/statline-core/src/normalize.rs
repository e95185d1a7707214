//! Row normalization: raw, header-named source cells → typed records.
//!
//! Headers are renamed through the field table in [`crate::field`]. Unknown
//! headers are ignored and known-but-absent ones fall back to the field's
//! zero value, so a sparse file still normalizes; only a missing or
//! unusable player name drops a row.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::{
  field::{self, Field, MISSING_TEXT, coerce},
  id::generate_id,
  stat::{BattingLine, NewSeasonStat},
  subject::{NewSubject, SubjectId},
};

/// One source row: header → raw cell text.
pub type RawRecord = BTreeMap<String, String>;

/// Batch-wide normalization policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
  /// Season assigned to every row when the source has no season column.
  pub default_season: i32,
}

/// Why a row was dropped before reaching the writer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DropReason {
  #[error("player name is missing")]
  MissingName,

  #[error("player name {0:?} has no usable characters")]
  UnusableName(String),
}

/// A fully typed row with its derived subject id.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
  pub subject_id:   SubjectId,
  pub display_name: String,
  pub age:          Option<i64>,
  pub stat:         NewSeasonStat,
}

impl NormalizedRecord {
  pub fn new_subject(&self) -> NewSubject {
    NewSubject {
      subject_id:   self.subject_id.clone(),
      display_name: self.display_name.clone(),
    }
  }
}

/// Output of [`Normalizer::normalize_batch`].
#[derive(Debug, Default)]
pub struct NormalizedBatch {
  pub records: Vec<NormalizedRecord>,
  /// Zero-based source row index and the reason it was dropped.
  pub dropped: Vec<(usize, DropReason)>,
}

// ─── Normalizer ──────────────────────────────────────────────────────────────

/// Normalizes the rows of one batch. Built from the batch's header row so
/// the season and age policies are decided once, not per row.
#[derive(Debug, Clone)]
pub struct Normalizer {
  injected_season: Option<i32>,
  /// Without an age column the id has no age segment; with one, a blank
  /// or unparsable cell coerces to `0` like any integer field.
  has_age:         bool,
}

impl Normalizer {
  pub fn for_headers<S: AsRef<str>>(headers: &[S], options: NormalizeOptions) -> Self {
    let provided: Vec<&'static Field> = headers
      .iter()
      .filter_map(|h| field::by_header(h.as_ref()))
      .collect();
    let has = |f: &Field| provided.iter().any(|p| *p == f);

    Self {
      injected_season: (!has(&field::SEASON)).then_some(options.default_season),
      has_age:         has(&field::AGE),
    }
  }

  /// The season injected into every row, if the source lacks one.
  pub fn injected_season(&self) -> Option<i32> { self.injected_season }

  pub fn normalize(&self, raw: &RawRecord) -> Result<NormalizedRecord, DropReason> {
    let name = cell(raw, &field::PLAYER_NAME)
      .map(str::trim)
      .filter(|n| !n.is_empty() && *n != MISSING_TEXT)
      .ok_or(DropReason::MissingName)?;

    let season = match self.injected_season {
      Some(season) => season,
      None => i32::try_from(integer(raw, &field::SEASON)).unwrap_or(0),
    };
    let age = self.has_age.then(|| integer(raw, &field::AGE));
    let team = text(raw, &field::TEAM);

    let subject_id = generate_id(name, age, Some(&team), Some(season))
      .ok_or_else(|| DropReason::UnusableName(name.to_owned()))?;

    let line = BattingLine {
      games_played:      integer(raw, &field::GAMES_PLAYED),
      plate_appearances: integer(raw, &field::PLATE_APPEARANCES),
      at_bats:           integer(raw, &field::AT_BATS),
      runs:              integer(raw, &field::RUNS),
      hits:              integer(raw, &field::HITS),
      doubles:           integer(raw, &field::DOUBLES),
      triples:           integer(raw, &field::TRIPLES),
      home_runs:         integer(raw, &field::HOME_RUNS),
      rbi:               integer(raw, &field::RBI),
      stolen_bases:      integer(raw, &field::STOLEN_BASES),
      caught_stealing:   integer(raw, &field::CAUGHT_STEALING),
      walks:             integer(raw, &field::WALKS),
      strikeouts:        integer(raw, &field::STRIKEOUTS),
      batting_average:   decimal(raw, &field::BATTING_AVERAGE),
      obp:               decimal(raw, &field::OBP),
      slg:               decimal(raw, &field::SLG),
      ops:               decimal(raw, &field::OPS),
      ops_plus:          decimal(raw, &field::OPS_PLUS),
      roba:              decimal(raw, &field::ROBA),
      rbat_plus:         decimal(raw, &field::RBAT_PLUS),
      total_bases:       integer(raw, &field::TOTAL_BASES),
      gidp:              integer(raw, &field::GIDP),
      hit_by_pitch:      integer(raw, &field::HIT_BY_PITCH),
      sac_hits:          integer(raw, &field::SAC_HITS),
      sac_flies:         integer(raw, &field::SAC_FLIES),
      intentional_walks: integer(raw, &field::INTENTIONAL_WALKS),
      war:               decimal(raw, &field::WAR),
    };

    Ok(NormalizedRecord {
      subject_id: subject_id.clone(),
      display_name: name.to_owned(),
      age,
      stat: NewSeasonStat {
        subject_id,
        season,
        team,
        league: Some(text(raw, &field::LEAGUE)),
        position_played: Some(text(raw, &field::POSITION_PLAYED)),
        line,
      },
    })
  }

  /// Normalize every row, keeping source order and recording drops.
  pub fn normalize_batch<'a, I>(&self, rows: I) -> NormalizedBatch
  where
    I: IntoIterator<Item = &'a RawRecord>,
  {
    let mut batch = NormalizedBatch::default();
    for (idx, raw) in rows.into_iter().enumerate() {
      match self.normalize(raw) {
        Ok(record) => batch.records.push(record),
        Err(reason) => batch.dropped.push((idx, reason)),
      }
    }
    batch
  }
}

fn cell<'a>(raw: &'a RawRecord, field: &Field) -> Option<&'a str> {
  raw
    .get(field.header)
    .or_else(|| raw.get(field.name))
    .map(String::as_str)
}

fn integer(raw: &RawRecord, field: &Field) -> i64 {
  coerce(field.kind, cell(raw, field)).as_i64().unwrap_or(0)
}

fn decimal(raw: &RawRecord, field: &Field) -> f64 {
  coerce(field.kind, cell(raw, field)).as_f64().unwrap_or(0.0)
}

fn text(raw: &RawRecord, field: &Field) -> String {
  coerce(field.kind, cell(raw, field))
    .into_text()
    .unwrap_or_else(|| MISSING_TEXT.to_owned())
}

#[cfg(test)]
mod tests {
  use super::*;

  const OPTIONS: NormalizeOptions = NormalizeOptions { default_season: 2023 };

  fn record(pairs: &[(&str, &str)]) -> RawRecord {
    pairs
      .iter()
      .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
      .collect()
  }

  fn normalizer_for(raw: &RawRecord) -> Normalizer {
    let headers: Vec<&str> = raw.keys().map(String::as_str).collect();
    Normalizer::for_headers(&headers, OPTIONS)
  }

  fn ohtani() -> RawRecord {
    record(&[
      ("Player", "Shohei Ohtani"),
      ("Team", "LAA"),
      ("Age", "29"),
      ("G", "135"),
      ("AB", "497"),
      ("H", "151"),
      ("HR", "44"),
      ("BB", "91"),
      ("SO", "143"),
      ("OBP", ".412"),
      ("SLG", ".654"),
      ("OPS", "1.066"),
      ("WAR", "9.0"),
      ("season", "2023"),
    ])
  }

  #[test]
  fn normalizes_full_row() {
    let raw = ohtani();
    let rec = normalizer_for(&raw).normalize(&raw).unwrap();

    assert_eq!(rec.subject_id.as_str(), "shohei_ohtani_29_laa_2023");
    assert_eq!(rec.display_name, "Shohei Ohtani");
    assert_eq!(rec.age, Some(29));
    assert_eq!(rec.stat.subject_id, rec.subject_id);
    assert_eq!(rec.stat.season, 2023);
    assert_eq!(rec.stat.team, "LAA");
    assert_eq!(rec.stat.league.as_deref(), Some(MISSING_TEXT));
    assert_eq!(rec.stat.line.games_played, 135);
    assert_eq!(rec.stat.line.at_bats, 497);
    assert_eq!(rec.stat.line.hits, 151);
    assert_eq!(rec.stat.line.home_runs, 44);
    assert_eq!(rec.stat.line.walks, 91);
    assert_eq!(rec.stat.line.strikeouts, 143);
    assert_eq!(rec.stat.line.obp, 0.412);
    assert_eq!(rec.stat.line.slg, 0.654);
    assert_eq!(rec.stat.line.ops, 1.066);
    assert_eq!(rec.stat.line.war, 9.0);
    // Absent columns fall back to zero.
    assert_eq!(rec.stat.line.triples, 0);
    assert_eq!(rec.stat.line.roba, 0.0);
  }

  #[test]
  fn injects_default_season_when_column_absent() {
    let raw = record(&[("Player", "Jane Doe"), ("Team", "NYY")]);
    let n = normalizer_for(&raw);
    assert_eq!(n.injected_season(), Some(2023));

    let rec = n.normalize(&raw).unwrap();
    assert_eq!(rec.stat.season, 2023);
    assert_eq!(rec.subject_id.as_str(), "jane_doe_nyy_2023");
  }

  #[test]
  fn source_season_wins_over_default() {
    let raw = record(&[("Player", "Jane Doe"), ("Season", "2019")]);
    let n = normalizer_for(&raw);
    assert_eq!(n.injected_season(), None);
    assert_eq!(n.normalize(&raw).unwrap().stat.season, 2019);
  }

  #[test]
  fn season_policy_is_per_batch_not_per_row() {
    // The column exists, so a blank cell coerces to zero instead of taking
    // the default.
    let n = Normalizer::for_headers(&["Player", "Season"], OPTIONS);
    let raw = record(&[("Player", "Jane Doe"), ("Season", "")]);
    assert_eq!(n.normalize(&raw).unwrap().stat.season, 0);
  }

  #[test]
  fn absent_age_and_team_columns_are_omitted_from_id() {
    let raw = record(&[("Player", "Jane Doe"), ("season", "2024")]);
    let rec = normalizer_for(&raw).normalize(&raw).unwrap();
    assert_eq!(rec.age, None);
    assert_eq!(rec.stat.team, MISSING_TEXT);
    assert_eq!(rec.subject_id.as_str(), "jane_doe_2024");
  }

  #[test]
  fn blank_or_junk_age_cell_coerces_to_zero() {
    let n = Normalizer::for_headers(&["Player", "Age", "Team", "season"], OPTIONS);
    for age in ["", "abc"] {
      let raw = record(&[
        ("Player", "Jane Doe"),
        ("Age", age),
        ("Team", "NYY"),
        ("season", "2023"),
      ]);
      let rec = n.normalize(&raw).unwrap();
      assert_eq!(rec.age, Some(0), "{age:?}");
      assert_eq!(rec.subject_id.as_str(), "jane_doe_0_nyy_2023", "{age:?}");
    }
  }

  #[test]
  fn age_column_under_canonical_name_counts() {
    let n = Normalizer::for_headers(&["Player", "age"], OPTIONS);
    let raw = record(&[("Player", "Jane Doe"), ("age", "31")]);
    assert_eq!(n.normalize(&raw).unwrap().subject_id.as_str(), "jane_doe_31_2023");
  }

  #[test]
  fn junk_numerics_become_zero() {
    let raw = record(&[
      ("Player", "Jane Doe"),
      ("G", "N/A"),
      ("HR", ""),
      ("OBP", "--"),
      ("OPS+", "abc"),
    ]);
    let rec = normalizer_for(&raw).normalize(&raw).unwrap();
    assert_eq!(rec.stat.line.games_played, 0);
    assert_eq!(rec.stat.line.home_runs, 0);
    assert_eq!(rec.stat.line.obp, 0.0);
    assert_eq!(rec.stat.line.ops_plus, 0.0);
  }

  #[test]
  fn unknown_columns_are_ignored() {
    let raw = record(&[("Player", "Jane Doe"), ("Rk", "1"), ("Awards", "MVP-1")]);
    let rec = normalizer_for(&raw).normalize(&raw).unwrap();
    assert_eq!(rec.stat.line, BattingLine::default());
  }

  #[test]
  fn drops_rows_without_usable_name() {
    let n = Normalizer::for_headers(&["Player"], OPTIONS);
    assert_eq!(n.normalize(&record(&[("Player", "  ")])), Err(DropReason::MissingName));
    assert_eq!(n.normalize(&record(&[("Team", "LAA")])), Err(DropReason::MissingName));
    assert_eq!(
      n.normalize(&record(&[("Player", "***")])),
      Err(DropReason::UnusableName("***".into()))
    );
  }

  #[test]
  fn batch_keeps_order_and_reports_drops() {
    let rows = vec![
      record(&[("Player", "A One")]),
      record(&[("Player", "")]),
      record(&[("Player", "B Two")]),
    ];
    let n = Normalizer::for_headers(&["Player"], OPTIONS);
    let batch = n.normalize_batch(&rows);

    let names: Vec<_> = batch.records.iter().map(|r| r.display_name.as_str()).collect();
    assert_eq!(names, ["A One", "B Two"]);
    assert_eq!(batch.dropped, vec![(1, DropReason::MissingName)]);
  }
}
