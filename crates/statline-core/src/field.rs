//! The fixed field table: every canonical field the loader understands, the
//! source header it is read from, and its type class.
//!
//! This table is the single place column types are declared. The normalizer
//! coerces with it and the store's column list is checked against it.

/// Sentinel written for absent text values.
pub const MISSING_TEXT: &str = "N/A";

/// Type class of a field, which decides how raw text is coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
  /// Whole number; absent or unparsable values become `0`.
  Integer,
  /// Floating point rounded to `places` decimals; absent or unparsable
  /// values become `0.0`.
  Decimal { places: u32 },
  /// Free text; absent values become [`MISSING_TEXT`].
  Text,
}

/// One canonical field and the source header it is renamed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
  /// Canonical name; also the column name in `season_stats`.
  pub name:   &'static str,
  /// Header used by the source file.
  pub header: &'static str,
  pub kind:   FieldKind,
  /// Whether the field is persisted as a `season_stats` column.
  pub stored: bool,
}

impl Field {
  const fn integer(name: &'static str, header: &'static str) -> Self {
    Self { name, header, kind: FieldKind::Integer, stored: true }
  }

  const fn decimal(name: &'static str, header: &'static str, places: u32) -> Self {
    Self { name, header, kind: FieldKind::Decimal { places }, stored: true }
  }

  const fn text(name: &'static str, header: &'static str) -> Self {
    Self { name, header, kind: FieldKind::Text, stored: true }
  }

  const fn unstored(self) -> Self { Self { stored: false, ..self } }

  /// Whether a source header supplies this field, either under its source
  /// header or its canonical name.
  pub fn matches_header(&self, header: &str) -> bool {
    header == self.header || header == self.name
  }
}

// ─── Identity and context ────────────────────────────────────────────────────

pub const PLAYER_NAME: Field = Field::text("player_name", "Player").unstored();
pub const AGE: Field = Field::integer("age", "Age").unstored();
pub const SEASON: Field = Field::integer("season", "Season");
pub const TEAM: Field = Field::text("team", "Team");
pub const LEAGUE: Field = Field::text("league", "Lg");
pub const POSITION_PLAYED: Field = Field::text("position_played", "Pos");

// ─── Counting stats ──────────────────────────────────────────────────────────

pub const GAMES_PLAYED: Field = Field::integer("games_played", "G");
pub const PLATE_APPEARANCES: Field = Field::integer("plate_appearances", "PA");
pub const AT_BATS: Field = Field::integer("at_bats", "AB");
pub const RUNS: Field = Field::integer("runs", "R");
pub const HITS: Field = Field::integer("hits", "H");
pub const DOUBLES: Field = Field::integer("doubles", "2B");
pub const TRIPLES: Field = Field::integer("triples", "3B");
pub const HOME_RUNS: Field = Field::integer("home_runs", "HR");
pub const RBI: Field = Field::integer("rbi", "RBI");
pub const STOLEN_BASES: Field = Field::integer("stolen_bases", "SB");
pub const CAUGHT_STEALING: Field = Field::integer("caught_stealing", "CS");
pub const WALKS: Field = Field::integer("walks", "BB");
pub const STRIKEOUTS: Field = Field::integer("strikeouts", "SO");
pub const TOTAL_BASES: Field = Field::integer("total_bases", "TB");
pub const GIDP: Field = Field::integer("gidp", "GIDP");
pub const HIT_BY_PITCH: Field = Field::integer("hit_by_pitch", "HBP");
pub const SAC_HITS: Field = Field::integer("sac_hits", "SH");
pub const SAC_FLIES: Field = Field::integer("sac_flies", "SF");
pub const INTENTIONAL_WALKS: Field = Field::integer("intentional_walks", "IBB");

// ─── Rate and value stats ────────────────────────────────────────────────────

pub const BATTING_AVERAGE: Field = Field::decimal("batting_average", "BA", 3);
pub const OBP: Field = Field::decimal("obp", "OBP", 3);
pub const SLG: Field = Field::decimal("slg", "SLG", 3);
pub const OPS: Field = Field::decimal("ops", "OPS", 3);
pub const ROBA: Field = Field::decimal("roba", "rOBA", 3);
pub const OPS_PLUS: Field = Field::decimal("ops_plus", "OPS+", 1);
pub const RBAT_PLUS: Field = Field::decimal("rbat_plus", "Rbat+", 1);
pub const WAR: Field = Field::decimal("war", "WAR", 2);

/// Every field, in source-file order.
pub const FIELDS: &[Field] = &[
  PLAYER_NAME,
  AGE,
  SEASON,
  TEAM,
  LEAGUE,
  POSITION_PLAYED,
  GAMES_PLAYED,
  PLATE_APPEARANCES,
  AT_BATS,
  RUNS,
  HITS,
  DOUBLES,
  TRIPLES,
  HOME_RUNS,
  RBI,
  STOLEN_BASES,
  CAUGHT_STEALING,
  WALKS,
  STRIKEOUTS,
  BATTING_AVERAGE,
  OBP,
  SLG,
  OPS,
  OPS_PLUS,
  ROBA,
  RBAT_PLUS,
  TOTAL_BASES,
  GIDP,
  HIT_BY_PITCH,
  SAC_HITS,
  SAC_FLIES,
  INTENTIONAL_WALKS,
  WAR,
];

/// Look up the field a source header supplies. Unknown headers yield `None`.
pub fn by_header(header: &str) -> Option<&'static Field> {
  FIELDS.iter().find(|f| f.matches_header(header))
}

// ─── Coercion ────────────────────────────────────────────────────────────────

/// A coerced field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
  Integer(i64),
  Decimal(f64),
  Text(String),
}

impl Value {
  pub fn as_i64(&self) -> Option<i64> {
    match self {
      Value::Integer(i) => Some(*i),
      _ => None,
    }
  }

  pub fn as_f64(&self) -> Option<f64> {
    match self {
      Value::Decimal(d) => Some(*d),
      _ => None,
    }
  }

  pub fn into_text(self) -> Option<String> {
    match self {
      Value::Text(s) => Some(s),
      _ => None,
    }
  }
}

/// Coerce a raw cell into a typed value according to `kind`. Never fails:
/// absent, blank or unparsable input falls back to the kind's zero value.
pub fn coerce(kind: FieldKind, raw: Option<&str>) -> Value {
  match kind {
    FieldKind::Integer => Value::Integer(raw.and_then(parse_integer).unwrap_or(0)),
    FieldKind::Decimal { places } => Value::Decimal(
      raw.and_then(parse_decimal).map(|d| round_to(d, places)).unwrap_or(0.0),
    ),
    FieldKind::Text => Value::Text(match raw.map(str::trim) {
      Some(s) if !s.is_empty() => s.to_owned(),
      _ => MISSING_TEXT.to_owned(),
    }),
  }
}

/// Parse a whole number. Decimal input is truncated toward zero.
pub fn parse_integer(raw: &str) -> Option<i64> {
  let raw = raw.trim();
  raw
    .parse::<i64>()
    .ok()
    .or_else(|| parse_decimal(raw).map(|d| d.trunc() as i64))
}

/// Parse a finite decimal; `NaN` and infinities count as unparsable.
pub fn parse_decimal(raw: &str) -> Option<f64> {
  raw.trim().parse::<f64>().ok().filter(|d| d.is_finite())
}

/// Round `value` to `places` decimal digits.
pub fn round_to(value: f64, places: u32) -> f64 {
  let scale = 10f64.powi(places as i32);
  (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clean_integer_is_unchanged() {
    assert_eq!(coerce(FieldKind::Integer, Some("135")), Value::Integer(135));
    assert_eq!(coerce(FieldKind::Integer, Some(" -4 ")), Value::Integer(-4));
  }

  #[test]
  fn integer_truncates_decimal_input() {
    assert_eq!(coerce(FieldKind::Integer, Some("29.0")), Value::Integer(29));
    assert_eq!(coerce(FieldKind::Integer, Some("12.9")), Value::Integer(12));
  }

  #[test]
  fn junk_numerics_become_zero() {
    for raw in [None, Some(""), Some("N/A"), Some("abc"), Some("NaN"), Some("inf")] {
      assert_eq!(coerce(FieldKind::Integer, raw), Value::Integer(0), "{raw:?}");
      assert_eq!(
        coerce(FieldKind::Decimal { places: 3 }, raw),
        Value::Decimal(0.0),
        "{raw:?}"
      );
    }
  }

  #[test]
  fn decimals_round_to_scale() {
    assert_eq!(coerce(OBP.kind, Some(".412")), Value::Decimal(0.412));
    assert_eq!(coerce(OBP.kind, Some("0.41249")), Value::Decimal(0.412));
    assert_eq!(coerce(WAR.kind, Some("9")), Value::Decimal(9.0));
    assert_eq!(coerce(WAR.kind, Some("3.456")), Value::Decimal(3.46));
    assert_eq!(coerce(OPS_PLUS.kind, Some("190.44")), Value::Decimal(190.4));
  }

  #[test]
  fn blank_text_becomes_sentinel() {
    assert_eq!(coerce(FieldKind::Text, None), Value::Text(MISSING_TEXT.into()));
    assert_eq!(coerce(FieldKind::Text, Some("  ")), Value::Text(MISSING_TEXT.into()));
    assert_eq!(coerce(FieldKind::Text, Some(" LAA ")), Value::Text("LAA".into()));
  }

  #[test]
  fn headers_and_names_are_unique() {
    for (i, a) in FIELDS.iter().enumerate() {
      for b in &FIELDS[i + 1..] {
        assert_ne!(a.name, b.name);
        assert_ne!(a.header, b.header);
      }
    }
    assert_eq!(by_header("OPS+"), Some(&OPS_PLUS));
    assert_eq!(by_header("Rk"), None);
  }

  #[test]
  fn header_or_canonical_name_matches() {
    assert!(SEASON.matches_header("Season"));
    assert!(SEASON.matches_header("season"));
    assert!(!SEASON.matches_header("Yr"));
    assert_eq!(by_header("Lg"), Some(&LEAGUE));
    assert_eq!(by_header("league"), Some(&LEAGUE));
  }

  #[test]
  fn accessors_only_read_their_own_kind() {
    assert_eq!(coerce(HOME_RUNS.kind, Some("44")).as_i64(), Some(44));
    assert_eq!(coerce(WAR.kind, Some("9.0")).as_f64(), Some(9.0));
    assert_eq!(coerce(TEAM.kind, Some("LAA")).into_text().as_deref(), Some("LAA"));
    assert_eq!(coerce(TEAM.kind, Some("44")).as_i64(), None);
    assert_eq!(coerce(HOME_RUNS.kind, Some("44")).into_text(), None);
  }
}
