//! Cleaned summary CSV, one row per method.

use std::path::Path;

use crate::Result;
use crate::aggregate::SummaryRow;

/// Write the aggregated rows. Missing values are left as empty cells.
pub fn write_summary_csv(rows: &[SummaryRow], path: &Path) -> Result<()> {
  let mut writer = csv::Writer::from_path(path)?;
  for row in rows {
    writer.serialize(row)?;
  }
  writer.flush()?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn test_summary_csv_columns_and_blanks() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("summary.csv");
    let rows = vec![SummaryRow {
      method: "Regex".to_string(),
      mean_ms: Some(5.2),
      stddev_ms: Some(0.3),
      fallback_pct: None,
      accuracy_pct: None,
      samples: 30,
      ci95_ms: Some(0.25),
    }];

    write_summary_csv(&rows, &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(
      lines.next(),
      Some("Method,Mean_ms,StdDev_ms,Fallback_pct,Accuracy_pct,Samples,CI95_ms")
    );
    assert_eq!(lines.next(), Some("Regex,5.2,0.3,,,30,0.25"));
    assert_eq!(lines.next(), None);
  }

  #[test]
  fn test_empty_summary_writes_nothing_but_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("summary.csv");
    write_summary_csv(&[], &path).unwrap();
    assert!(path.exists());
  }
}
