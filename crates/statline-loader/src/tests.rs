//! End-to-end tests: CSV text in, rows in an in-memory SQLite store out.

use statline_core::{
  normalize::{NormalizeOptions, Normalizer},
  store::{IntegrityReport, StatStore},
  subject::SubjectId,
};
use statline_store_sqlite::SqliteStore;

use crate::{
  Error, LoadOutcome, LoadReport, load_table, run,
  source::read_from,
  writer::{StatStep, SubjectStep, UpsertWriter},
};

const OPTIONS: NormalizeOptions = NormalizeOptions { default_season: 2023 };

const OHTANI_CSV: &str = "\
Player,Team,Age,G,AB,H,HR,BB,SO,OBP,SLG,OPS,WAR,season
Shohei Ohtani,LAA,29,135,497,151,44,91,143,.412,.654,1.066,9.0,2023
";

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn load(store: &SqliteStore, csv: &str) -> LoadOutcome {
  let table = read_from(csv.as_bytes()).unwrap();
  load_table(store, &table, OPTIONS).await.unwrap()
}

fn completed(outcome: LoadOutcome) -> LoadReport {
  match outcome {
    LoadOutcome::Completed(report) => report,
    other => panic!("expected a completed load, got {other:?}"),
  }
}

fn id(s: &str) -> SubjectId { SubjectId::new(s).unwrap() }

// ─── End to end ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn ohtani_row_produces_subject_and_stat() {
  let s = store().await;
  let report = completed(load(&s, OHTANI_CSV).await);
  assert_eq!(report.subjects_created, 1);
  assert_eq!(report.stats_inserted, 1);

  let ohtani = id("shohei_ohtani_29_laa_2023");
  let subject = s.get_subject(&ohtani).await.unwrap().unwrap();
  assert_eq!(subject.display_name, "Shohei Ohtani");
  assert_eq!(subject.primary_position, None);
  assert_eq!(subject.debut_year, None);

  let rows = s.subject_season_stats(&ohtani, 2023).await.unwrap();
  assert_eq!(rows.len(), 1);
  let stat = &rows[0].stat.stat;
  assert_eq!(stat.team, "LAA");
  assert_eq!(stat.season, 2023);
  assert_eq!(stat.line.games_played, 135);
  assert_eq!(stat.line.at_bats, 497);
  assert_eq!(stat.line.hits, 151);
  assert_eq!(stat.line.home_runs, 44);
  assert_eq!(stat.line.walks, 91);
  assert_eq!(stat.line.strikeouts, 143);
  assert_eq!(stat.line.obp, 0.412);
  assert_eq!(stat.line.slg, 0.654);
  assert_eq!(stat.line.ops, 1.066);
  assert_eq!(stat.line.war, 9.00);
  assert_eq!(stat.league.as_deref(), Some("N/A"));
}

#[tokio::test]
async fn run_reads_file_and_creates_schema() {
  let dir = tempfile::tempdir().unwrap();
  let csv_path = dir.path().join("batting.csv");
  std::fs::write(&csv_path, OHTANI_CSV).unwrap();

  let s = SqliteStore::open(dir.path().join("stats.db")).await.unwrap();
  let report = completed(run(&s, &csv_path, OPTIONS).await.unwrap());

  assert_eq!(report.rows_read, 1);
  assert_eq!(report.stats_inserted, 1);
  assert_eq!(report.integrity, IntegrityReport::default());
}

#[tokio::test]
async fn missing_source_file_is_fatal() {
  let dir = tempfile::tempdir().unwrap();
  let s = SqliteStore::open(dir.path().join("stats.db")).await.unwrap();

  let err = run(&s, &dir.path().join("missing.csv"), OPTIONS).await.unwrap_err();
  assert!(matches!(err, Error::SourceNotFound(_)));
}

// ─── Idempotence asymmetry ───────────────────────────────────────────────────

#[tokio::test]
async fn rerun_keeps_one_subject_but_duplicates_stats() {
  let s = store().await;
  completed(load(&s, OHTANI_CSV).await);
  let second = completed(load(&s, OHTANI_CSV).await);

  assert_eq!(second.subjects_created, 0);
  assert_eq!(second.subjects_existing, 1);
  assert_eq!(second.stats_inserted, 1);

  assert_eq!(s.list_subjects().await.unwrap().len(), 1);
  let rows = s
    .subject_season_stats(&id("shohei_ohtani_29_laa_2023"), 2023)
    .await
    .unwrap();
  assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn same_subject_twice_in_one_file() {
  let s = store().await;
  let csv = "Player,Team,Age,HR\nJane Doe,NYY,30,10\nJane Doe,NYY,30,12\n";
  let report = completed(load(&s, csv).await);

  assert_eq!(report.subjects_created, 1);
  assert_eq!(report.subjects_existing, 1);
  assert_eq!(report.stats_inserted, 2);
  assert_eq!(s.list_subjects().await.unwrap().len(), 1);
  assert_eq!(s.season_stats(2023).await.unwrap().len(), 2);
}

// ─── Normalization edge cases ────────────────────────────────────────────────

#[tokio::test]
async fn blank_age_cell_keeps_a_zero_age_segment() {
  let s = store().await;
  let csv = "Player,Age,Team,season\nJane Doe,,NYY,2023\nJohn Roe,abc,BOS,2023\n";
  completed(load(&s, csv).await);

  let ids: Vec<String> = s
    .list_subjects()
    .await
    .unwrap()
    .into_iter()
    .map(|p| String::from(p.subject_id))
    .collect();
  assert_eq!(ids, ["jane_doe_0_nyy_2023", "john_roe_0_bos_2023"]);
}

#[tokio::test]
async fn default_season_fills_missing_column() {
  let s = store().await;
  let table = read_from("Player,Team\nJane Doe,BOS\n".as_bytes()).unwrap();
  let options = NormalizeOptions { default_season: 2025 };
  completed(load_table(&s, &table, options).await.unwrap());

  let rows = s.season_stats(2025).await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].stat.stat.subject_id.as_str(), "jane_doe_bos_2025");
}

#[tokio::test]
async fn blank_names_yield_no_valid_records_and_no_writes() {
  let s = store().await;
  let csv = "Player,Team,HR\n,LAA,3\n   ,NYY,4\n";

  let outcome = load(&s, csv).await;
  assert_eq!(outcome, LoadOutcome::NoValidRecords { rows_read: 2, rows_dropped: 2 });
  assert!(s.list_subjects().await.unwrap().is_empty());
  assert!(s.season_stats(2023).await.unwrap().is_empty());
}

#[tokio::test]
async fn foreign_header_schema_is_no_data_not_a_crash() {
  let s = store().await;
  let csv = "Name,Club,Goals\nLionel Messi,MIA,20\n";
  assert!(matches!(load(&s, csv).await, LoadOutcome::NoValidRecords { .. }));
}

#[tokio::test]
async fn unusable_rows_are_dropped_and_the_rest_load() {
  let s = store().await;
  let csv = "Player,Team,HR\nA One,LAA,1\n,LAA,2\nB Two,LAA,N/A\n";
  let report = completed(load(&s, csv).await);

  assert_eq!(report.rows_read, 3);
  assert_eq!(report.rows_dropped, 1);
  assert_eq!(report.stats_inserted, 2);

  let rows = s.season_stats(2023).await.unwrap();
  assert_eq!(rows[1].display_name, "B Two");
  assert_eq!(rows[1].stat.stat.line.home_runs, 0);
}

// ─── Failure isolation ───────────────────────────────────────────────────────

#[tokio::test]
async fn failed_stat_row_does_not_stop_the_batch() {
  let s = store().await;
  // The second team code exceeds the 10-character column limit.
  let csv = "Player,Team\nA One,LAA\nB Two,Far Too Long Team\nC Three,NYY\n";
  let report = completed(load(&s, csv).await);

  assert_eq!(report.subjects_created, 3);
  assert_eq!(report.stats_inserted, 2);
  assert_eq!(report.stat_failures, 1);
  assert_eq!(
    report.integrity,
    IntegrityReport { orphaned_stats: 0, subjects_without_stats: 1 }
  );

  let who: Vec<String> = s
    .season_stats(2023)
    .await
    .unwrap()
    .into_iter()
    .map(|r| r.display_name)
    .collect();
  assert_eq!(who, ["A One", "C Three"]);
}

// ─── Writer cache ────────────────────────────────────────────────────────────

#[tokio::test]
async fn writer_cache_does_not_outlive_a_run() {
  let s = store().await;
  let table = read_from(OHTANI_CSV.as_bytes()).unwrap();
  let normalizer = Normalizer::for_headers(table.headers.as_slice(), OPTIONS);
  let record = normalizer.normalize(&table.rows[0]).unwrap();

  let mut first_run = UpsertWriter::new(&s);
  let a = first_run.write(&record).await;
  let b = first_run.write(&record).await;
  assert_eq!(a.subject, SubjectStep::Created);
  assert_eq!(b.subject, SubjectStep::Cached);
  assert!(matches!(b.stat, StatStep::Inserted { .. }));

  // A fresh writer re-checks storage instead of trusting the old cache.
  let mut second_run = UpsertWriter::new(&s);
  let c = second_run.write(&record).await;
  assert_eq!(c.subject, SubjectStep::AlreadyPresent);
}
