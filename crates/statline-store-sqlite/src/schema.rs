//! SQL schema for the statline SQLite store.
//!
//! [`CONNECTION_PRAGMAS`] run on every connection; [`SCHEMA`] runs from
//! `SqliteStore::ensure_schema`, once per loader run.

/// Per-connection settings. Foreign keys are off by default in SQLite.
pub const CONNECTION_PRAGMAS: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;
";

/// Tables owned by the schema, in creation order.
pub const TABLES: [&str; 2] = ["subjects", "season_stats"];

/// Full schema DDL; idempotent thanks to `CREATE … IF NOT EXISTS`.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS subjects (
    subject_id        TEXT NOT NULL PRIMARY KEY
                      CHECK (length(subject_id) BETWEEN 1 AND 50),
    display_name      TEXT NOT NULL,
    primary_position  TEXT,
    debut_year        INTEGER
);

-- Stat rows are strictly append-only; reruns duplicate them.
CREATE TABLE IF NOT EXISTS season_stats (
    stat_id           INTEGER PRIMARY KEY AUTOINCREMENT,
    subject_id        TEXT NOT NULL REFERENCES subjects(subject_id),
    season            INTEGER NOT NULL,
    team              TEXT NOT NULL CHECK (length(team) <= 10),
    league            TEXT,
    position_played   TEXT,
    games_played      INTEGER NOT NULL DEFAULT 0,
    plate_appearances INTEGER NOT NULL DEFAULT 0,
    at_bats           INTEGER NOT NULL DEFAULT 0,
    runs              INTEGER NOT NULL DEFAULT 0,
    hits              INTEGER NOT NULL DEFAULT 0,
    doubles           INTEGER NOT NULL DEFAULT 0,
    triples           INTEGER NOT NULL DEFAULT 0,
    home_runs         INTEGER NOT NULL DEFAULT 0,
    rbi               INTEGER NOT NULL DEFAULT 0,
    stolen_bases      INTEGER NOT NULL DEFAULT 0,
    caught_stealing   INTEGER NOT NULL DEFAULT 0,
    walks             INTEGER NOT NULL DEFAULT 0,
    strikeouts        INTEGER NOT NULL DEFAULT 0,
    batting_average   REAL    NOT NULL DEFAULT 0,   -- 3 places
    obp               REAL    NOT NULL DEFAULT 0,   -- 3 places
    slg               REAL    NOT NULL DEFAULT 0,   -- 3 places
    ops               REAL    NOT NULL DEFAULT 0,   -- 3 places
    ops_plus          REAL    NOT NULL DEFAULT 0,   -- 1 place
    roba              REAL    NOT NULL DEFAULT 0,   -- 3 places
    rbat_plus         REAL    NOT NULL DEFAULT 0,   -- 1 place
    total_bases       INTEGER NOT NULL DEFAULT 0,
    gidp              INTEGER NOT NULL DEFAULT 0,
    hit_by_pitch      INTEGER NOT NULL DEFAULT 0,
    sac_hits          INTEGER NOT NULL DEFAULT 0,
    sac_flies         INTEGER NOT NULL DEFAULT 0,
    intentional_walks INTEGER NOT NULL DEFAULT 0,
    war               REAL    NOT NULL DEFAULT 0    -- 2 places
);

CREATE INDEX IF NOT EXISTS season_stats_subject_idx ON season_stats(subject_id, season);
CREATE INDEX IF NOT EXISTS season_stats_season_idx  ON season_stats(season);
";

/// Which of [`TABLES`] already exist on `conn`.
pub fn existing_tables(conn: &rusqlite::Connection) -> rusqlite::Result<Vec<String>> {
  let mut stmt = conn.prepare(
    "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN (?1, ?2)",
  )?;
  let names = stmt
    .query_map(rusqlite::params![TABLES[0], TABLES[1]], |row| row.get(0))?
    .collect::<rusqlite::Result<Vec<String>>>()?;
  Ok(names)
}
