//! Per-sample rows used for the runtime scaling plot.

use crate::normalize::{Frame, INPUT_LENGTH, RUNTIME_MS};

/// A single per-sample measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailedRow {
  pub method: String,
  pub input_length: f64,
  pub runtime_ms: f64,
}

/// Mean runtime per input length for one method, ordered by input length.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingSeries {
  pub method: String,
  pub points: Vec<(f64, f64)>,
}

/// What the frame offers for the scaling plot.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalingData {
  /// No `InputLength` column: the CSV holds pre-aggregated rows.
  NotDetailed,
  /// Per-sample rows without a `Runtime_ms` column.
  MissingRuntime,
  /// One series per method, in order of first appearance.
  Series(Vec<ScalingSeries>),
}

impl ScalingData {
  pub fn from_frame(frame: &Frame) -> Self {
    if !frame.has_column(INPUT_LENGTH) {
      return Self::NotDetailed;
    }
    match detailed_rows(frame) {
      Some(rows) => Self::Series(build_series(&rows)),
      None => Self::MissingRuntime,
    }
  }
}

/// Complete per-sample rows; `None` unless the frame has method, input length
/// and runtime columns.
pub fn detailed_rows(frame: &Frame) -> Option<Vec<DetailedRow>> {
  let methods = frame.methods()?;
  let lengths = frame.numeric(INPUT_LENGTH)?;
  let runtimes = frame.numeric(RUNTIME_MS)?;

  let rows = methods
    .iter()
    .zip(lengths)
    .zip(runtimes)
    .filter_map(|((method, length), runtime)| {
      if method.is_empty() {
        return None;
      }
      Some(DetailedRow {
        method: method.clone(),
        input_length: (*length)?,
        runtime_ms: (*runtime)?,
      })
    })
    .collect();
  Some(rows)
}

/// Average runtimes within each (method, input length) bucket.
pub fn build_series(rows: &[DetailedRow]) -> Vec<ScalingSeries> {
  let mut buckets: Vec<(String, Vec<(f64, f64, usize)>)> = Vec::new();

  for row in rows {
    let idx = match buckets.iter().position(|(m, _)| *m == row.method) {
      Some(idx) => idx,
      None => {
        buckets.push((row.method.clone(), Vec::new()));
        buckets.len() - 1
      }
    };
    let points = &mut buckets[idx].1;
    match points.iter_mut().find(|(len, _, _)| *len == row.input_length) {
      Some((_, sum, count)) => {
        *sum += row.runtime_ms;
        *count += 1;
      }
      None => points.push((row.input_length, row.runtime_ms, 1)),
    }
  }

  buckets
    .into_iter()
    .map(|(method, mut points)| {
      points.sort_by(|a, b| a.0.total_cmp(&b.0));
      ScalingSeries {
        method,
        points: points
          .into_iter()
          .map(|(len, sum, count)| (len, sum / count as f64))
          .collect(),
      }
    })
    .collect()
}
