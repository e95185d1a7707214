//! Row mapping between SQLite result rows and domain types.
//!
//! Column order in the SELECT strings below is load-bearing: the readers
//! fetch by index.

use statline_core::{
  stat::{BattingLine, NewSeasonStat, SeasonStat, SubjectSeasonStat},
  subject::{Subject, SubjectId},
};

use crate::Result;

// ─── Subjects ────────────────────────────────────────────────────────────────

pub const SUBJECT_SELECT: &str =
  "SELECT subject_id, display_name, primary_position, debut_year FROM subjects";

/// Raw values read directly from a `subjects` row.
pub struct RawSubject {
  pub subject_id:       String,
  pub display_name:     String,
  pub primary_position: Option<String>,
  pub debut_year:       Option<i32>,
}

impl RawSubject {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      subject_id:       row.get(0)?,
      display_name:     row.get(1)?,
      primary_position: row.get(2)?,
      debut_year:       row.get(3)?,
    })
  }

  pub fn into_subject(self) -> Result<Subject> {
    Ok(Subject {
      subject_id:       SubjectId::new(self.subject_id)?,
      display_name:     self.display_name,
      primary_position: self.primary_position,
      debut_year:       self.debut_year,
    })
  }
}

// ─── Stat rows ───────────────────────────────────────────────────────────────

/// Stat rows joined with their subject's display name.
pub const STAT_SELECT: &str = "
SELECT
  s.stat_id, s.subject_id, s.season, s.team, s.league, s.position_played,
  s.games_played, s.plate_appearances, s.at_bats, s.runs, s.hits,
  s.doubles, s.triples, s.home_runs, s.rbi, s.stolen_bases,
  s.caught_stealing, s.walks, s.strikeouts, s.batting_average, s.obp,
  s.slg, s.ops, s.ops_plus, s.roba, s.rbat_plus,
  s.total_bases, s.gidp, s.hit_by_pitch, s.sac_hits, s.sac_flies,
  s.intentional_walks, s.war,
  p.display_name
FROM season_stats s
JOIN subjects p ON p.subject_id = s.subject_id";

pub const STAT_INSERT: &str = "
INSERT INTO season_stats (
  subject_id, season, team, league, position_played,
  games_played, plate_appearances, at_bats, runs, hits,
  doubles, triples, home_runs, rbi, stolen_bases,
  caught_stealing, walks, strikeouts, batting_average, obp,
  slg, ops, ops_plus, roba, rbat_plus,
  total_bases, gidp, hit_by_pitch, sac_hits, sac_flies,
  intentional_walks, war
) VALUES (
  ?1, ?2, ?3, ?4, ?5,
  ?6, ?7, ?8, ?9, ?10,
  ?11, ?12, ?13, ?14, ?15,
  ?16, ?17, ?18, ?19, ?20,
  ?21, ?22, ?23, ?24, ?25,
  ?26, ?27, ?28, ?29, ?30,
  ?31, ?32
)";

/// Raw values read from a [`STAT_SELECT`] row.
pub struct RawSeasonStat {
  pub stat_id:         i64,
  pub subject_id:      String,
  pub season:          i32,
  pub team:            String,
  pub league:          Option<String>,
  pub position_played: Option<String>,
  pub line:            BattingLine,
  pub display_name:    String,
}

impl RawSeasonStat {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      stat_id:         row.get(0)?,
      subject_id:      row.get(1)?,
      season:          row.get(2)?,
      team:            row.get(3)?,
      league:          row.get(4)?,
      position_played: row.get(5)?,
      line:            BattingLine {
        games_played:      row.get(6)?,
        plate_appearances: row.get(7)?,
        at_bats:           row.get(8)?,
        runs:              row.get(9)?,
        hits:              row.get(10)?,
        doubles:           row.get(11)?,
        triples:           row.get(12)?,
        home_runs:         row.get(13)?,
        rbi:               row.get(14)?,
        stolen_bases:      row.get(15)?,
        caught_stealing:   row.get(16)?,
        walks:             row.get(17)?,
        strikeouts:        row.get(18)?,
        batting_average:   row.get(19)?,
        obp:               row.get(20)?,
        slg:               row.get(21)?,
        ops:               row.get(22)?,
        ops_plus:          row.get(23)?,
        roba:              row.get(24)?,
        rbat_plus:         row.get(25)?,
        total_bases:       row.get(26)?,
        gidp:              row.get(27)?,
        hit_by_pitch:      row.get(28)?,
        sac_hits:          row.get(29)?,
        sac_flies:         row.get(30)?,
        intentional_walks: row.get(31)?,
        war:               row.get(32)?,
      },
      display_name:    row.get(33)?,
    })
  }

  pub fn into_subject_stat(self) -> Result<SubjectSeasonStat> {
    Ok(SubjectSeasonStat {
      stat:         SeasonStat {
        stat_id: self.stat_id,
        stat:    NewSeasonStat {
          subject_id:      SubjectId::new(self.subject_id)?,
          season:          self.season,
          team:            self.team,
          league:          self.league,
          position_played: self.position_played,
          line:            self.line,
        },
      },
      display_name: self.display_name,
    })
  }
}
