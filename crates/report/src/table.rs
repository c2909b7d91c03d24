//! Raw CSV table as read from disk.

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::Result;

/// A CSV file with trimmed headers and untyped string cells.
///
/// Every row has exactly `headers.len()` cells; short rows are padded with
/// empty strings and surplus cells are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
  pub headers: Vec<String>,
  pub rows: Vec<Vec<String>>,
}

impl RawTable {
  /// Read a CSV file from disk.
  pub fn from_path(path: &Path) -> Result<Self> {
    let file = std::fs::File::open(path)?;
    Self::from_reader(file)
  }

  /// Read CSV data from any reader.
  pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
      let record = record?;
      let mut row: Vec<String> = record.iter().take(headers.len()).map(str::to_string).collect();
      row.resize(headers.len(), String::new());
      rows.push(row);
    }

    debug!("Read {} rows x {} columns", rows.len(), headers.len());
    Ok(Self { headers, rows })
  }

  /// Build a table from literal headers and rows.
  pub fn new(headers: &[&str], rows: &[&[&str]]) -> Self {
    let headers: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
    let rows = rows
      .iter()
      .map(|row| {
        let mut row: Vec<String> = row.iter().take(headers.len()).map(|c| c.to_string()).collect();
        row.resize(headers.len(), String::new());
        row
      })
      .collect();
    Self { headers, rows }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_headers_trimmed() {
    let data = " Method , Avg (ms)\nRegex,1.5\n";
    let table = RawTable::from_reader(data.as_bytes()).unwrap();
    assert_eq!(table.headers, vec!["Method", "Avg (ms)"]);
    assert_eq!(table.rows, vec![vec!["Regex".to_string(), "1.5".to_string()]]);
  }

  #[test]
  fn test_ragged_rows_normalized() {
    let data = "Method,Mean,Std\nRegex,1.5\nDFA,2.0,0.1,extra\n";
    let table = RawTable::from_reader(data.as_bytes()).unwrap();
    assert_eq!(table.rows[0], vec!["Regex", "1.5", ""]);
    assert_eq!(table.rows[1], vec!["DFA", "2.0", "0.1"]);
  }

  #[test]
  fn test_quoted_cells() {
    let data = "Method,Mean\n\"Hybrid (Regex, DFA)\",\"3.2 ms\"\n";
    let table = RawTable::from_reader(data.as_bytes()).unwrap();
    assert_eq!(table.rows[0][0], "Hybrid (Regex, DFA)");
    assert_eq!(table.rows[0][1], "3.2 ms");
  }

  #[test]
  fn test_missing_file() {
    assert!(RawTable::from_path(Path::new("/nonexistent/bench.csv")).is_err());
  }
}
