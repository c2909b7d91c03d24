//! Column canonicalization and numeric coercion.
//!
//! Benchmark CSVs come from several harnesses that disagree on naming
//! ("Avg(ms)", "Mean", "StdDev (ms)", "n", ...). Headers are mapped onto a
//! fixed vocabulary by an ordered keyword rule list, then every non-method
//! cell is reduced to the first number it contains.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::table::RawTable;

pub const METHOD: &str = "Method";
pub const MEAN_MS: &str = "Mean_ms";
pub const STDDEV_MS: &str = "StdDev_ms";
pub const CI95_MS: &str = "CI95_ms";
pub const FALLBACK_PCT: &str = "Fallback_pct";
pub const ACCURACY_PCT: &str = "Accuracy_pct";
pub const SAMPLES: &str = "Samples";
pub const INPUT_LENGTH: &str = "InputLength";
pub const RUNTIME_MS: &str = "Runtime_ms";
pub const MIN_MS: &str = "Min_ms";
pub const MAX_MS: &str = "Max_ms";

type Predicate = fn(&str) -> bool;

/// Ordered header rules. First match wins, so order decides ties such as a
/// header containing both "std" and "ci".
const COLUMN_RULES: &[(Predicate, &str)] = &[
  (|h| h.contains("method"), METHOD),
  (|h| (h.contains("mean") && !h.contains("ci")) || h.contains("avg"), MEAN_MS),
  (|h| h.contains("std"), STDDEV_MS),
  (|h| h.contains("ci") && h.contains("95"), CI95_MS),
  (|h| h.contains("fallback"), FALLBACK_PCT),
  (|h| h.contains("accuracy"), ACCURACY_PCT),
  (|h| h.contains("sample") || h.trim() == "n", SAMPLES),
  (|h| h.contains("input") && h.contains("len"), INPUT_LENGTH),
  (|h| h.contains("min"), MIN_MS),
  (|h| h.contains("max"), MAX_MS),
];

static NUMBER_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"[+-]?\d*\.?\d+(?:[eE][+-]?\d+)?").expect("number pattern is valid"));

/// Map a raw header to its canonical name, or `None` if no rule matches.
pub fn canonical_name(header: &str) -> Option<&'static str> {
  let lower = header.trim().to_lowercase();
  COLUMN_RULES
    .iter()
    .find(|(matches, _)| matches(&lower))
    .map(|(_, name)| *name)
}

/// Extract the first floating-point literal from a cell.
///
/// `"12.3 ms"` gives `Some(12.3)`; empty or number-free cells give `None`,
/// as do literals that overflow `f64` (`"1e999"`).
pub fn extract_number(cell: &str) -> Option<f64> {
  NUMBER_RE
    .find(cell)
    .and_then(|m| m.as_str().parse::<f64>().ok())
    .filter(|v| v.is_finite())
}

/// One canonicalized column.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
  Text(Vec<String>),
  Numeric(Vec<Option<f64>>),
}

/// A table after header canonicalization and numeric coercion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
  names: Vec<String>,
  columns: Vec<Column>,
  len: usize,
}

impl Frame {
  /// Canonicalize headers and coerce every non-`Method` column to numbers.
  pub fn from_raw(raw: &RawTable) -> Self {
    let names = canonicalize_headers(&raw.headers);

    let columns = names
      .iter()
      .enumerate()
      .map(|(idx, name)| {
        let cells = raw.rows.iter().map(|row| row.get(idx).map_or("", String::as_str));
        if name == METHOD {
          Column::Text(cells.map(|c| c.trim().to_string()).collect())
        } else {
          Column::Numeric(cells.map(extract_number).collect())
        }
      })
      .collect();

    Self {
      names,
      columns,
      len: raw.rows.len(),
    }
  }

  /// Canonical column names, in source order.
  pub fn names(&self) -> &[String] {
    &self.names
  }

  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  pub fn has_column(&self, name: &str) -> bool {
    self.names.iter().any(|n| n == name)
  }

  fn column(&self, name: &str) -> Option<&Column> {
    self.names.iter().position(|n| n == name).map(|idx| &self.columns[idx])
  }

  /// The method column, if present.
  pub fn methods(&self) -> Option<&[String]> {
    match self.column(METHOD)? {
      Column::Text(values) => Some(values),
      Column::Numeric(_) => None,
    }
  }

  /// A numeric column, if present.
  pub fn numeric(&self, name: &str) -> Option<&[Option<f64>]> {
    match self.column(name)? {
      Column::Numeric(values) => Some(values),
      Column::Text(_) => None,
    }
  }
}

fn canonicalize_headers(headers: &[String]) -> Vec<String> {
  let mut taken = HashSet::new();
  headers
    .iter()
    .map(|header| match canonical_name(header) {
      Some(name) if taken.insert(name) => {
        debug!("Column '{}' -> {}", header, name);
        name.to_string()
      }
      Some(name) => {
        warn!("Column '{}' also maps to {}; keeping original name", header, name);
        header.trim().to_string()
      }
      None => header.trim().to_string(),
    })
    .collect()
}
