//! Season stat rows: one per subject per season per team stint.
//!
//! Stat rows are append-only. Loading the same file twice stores every line
//! twice; readers must tolerate several rows for one `(subject_id, season)`.

use serde::{Deserialize, Serialize};

use crate::subject::SubjectId;

/// The typed performance columns of a stat row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BattingLine {
  pub games_played:      i64,
  pub plate_appearances: i64,
  pub at_bats:           i64,
  pub runs:              i64,
  pub hits:              i64,
  pub doubles:           i64,
  pub triples:           i64,
  pub home_runs:         i64,
  pub rbi:               i64,
  pub stolen_bases:      i64,
  pub caught_stealing:   i64,
  pub walks:             i64,
  pub strikeouts:        i64,
  pub batting_average:   f64,
  pub obp:               f64,
  pub slg:               f64,
  pub ops:               f64,
  pub ops_plus:          f64,
  pub roba:              f64,
  pub rbat_plus:         f64,
  pub total_bases:       i64,
  pub gidp:              i64,
  pub hit_by_pitch:      i64,
  pub sac_hits:          i64,
  pub sac_flies:         i64,
  pub intentional_walks: i64,
  pub war:               f64,
}

/// A stat row ready to be appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSeasonStat {
  pub subject_id:      SubjectId,
  pub season:          i32,
  pub team:            String,
  pub league:          Option<String>,
  pub position_played: Option<String>,
  #[serde(flatten)]
  pub line:            BattingLine,
}

/// A persisted stat row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonStat {
  pub stat_id: i64,
  #[serde(flatten)]
  pub stat:    NewSeasonStat,
}

/// A stat row joined with its subject's display name, as served by the
/// read API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectSeasonStat {
  #[serde(flatten)]
  pub stat:         SeasonStat,
  pub display_name: String,
}
