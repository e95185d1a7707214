//! Reading the source CSV into memory.

use std::{
  fs::File,
  io::{BufReader, ErrorKind, Read},
  path::Path,
};

use statline_core::{field::Field, normalize::RawRecord};
use tracing::warn;

use crate::{Error, Result};

/// The whole source file: its header row and every data row keyed by
/// header.
#[derive(Debug, Default)]
pub struct SourceTable {
  pub headers: Vec<String>,
  pub rows:    Vec<RawRecord>,
  /// Data rows the CSV reader could not decode; skipped with a warning.
  pub skipped: usize,
}

impl SourceTable {
  /// Whether the header row supplies `field` under its source header or
  /// its canonical name.
  pub fn has_column(&self, field: &Field) -> bool {
    self
      .headers
      .iter()
      .any(|h| field.matches_header(h))
  }
}

/// Read the CSV at `path`. A missing file is reported as
/// [`Error::SourceNotFound`].
pub fn read_path(path: &Path) -> Result<SourceTable> {
  let file = File::open(path).map_err(|e| match e.kind() {
    ErrorKind::NotFound => Error::SourceNotFound(path.to_path_buf()),
    _ => Error::Io(e),
  })?;
  read_from(BufReader::new(file))
}

/// Read CSV with a header row from any reader. Cells are trimmed and short
/// or long rows are accepted; surplus cells without a header are ignored.
pub fn read_from<R: Read>(reader: R) -> Result<SourceTable> {
  let mut rdr = csv::ReaderBuilder::new()
    .has_headers(true)
    .flexible(true)
    .trim(csv::Trim::All)
    .from_reader(reader);

  let headers: Vec<String> = rdr.headers()?.iter().map(str::to_owned).collect();

  let mut table = SourceTable { headers, ..Default::default() };
  for (idx, record) in rdr.records().enumerate() {
    let record = match record {
      Ok(r) => r,
      Err(e) => {
        warn!(row = idx + 1, error = %e, "skipping unreadable source row");
        table.skipped += 1;
        continue;
      }
    };
    let raw: RawRecord = table
      .headers
      .iter()
      .zip(record.iter())
      .map(|(h, v)| (h.clone(), v.to_owned()))
      .collect();
    table.rows.push(raw);
  }

  Ok(table)
}
