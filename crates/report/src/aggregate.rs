//! Per-method aggregation of canonicalized benchmark rows.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::normalize::{ACCURACY_PCT, CI95_MS, FALLBACK_PCT, Frame, MEAN_MS, SAMPLES, STDDEV_MS};

/// z-score for a two-sided 95% interval.
const Z_95: f64 = 1.96;

/// One row per method with missing values kept as `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
  #[serde(rename = "Method")]
  pub method: String,
  #[serde(rename = "Mean_ms")]
  pub mean_ms: Option<f64>,
  #[serde(rename = "StdDev_ms")]
  pub stddev_ms: Option<f64>,
  #[serde(rename = "Fallback_pct")]
  pub fallback_pct: Option<f64>,
  #[serde(rename = "Accuracy_pct")]
  pub accuracy_pct: Option<f64>,
  #[serde(rename = "Samples")]
  pub samples: i64,
  #[serde(rename = "CI95_ms")]
  pub ci95_ms: Option<f64>,
}

/// A summary row with rendering defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
  pub method: String,
  pub mean_ms: f64,
  pub stddev_ms: f64,
  pub ci95_ms: f64,
  pub fallback_pct: f64,
  pub accuracy_pct: f64,
  pub samples: i64,
}

impl SummaryRow {
  /// Missing values become 0.0, except accuracy which becomes 100.0.
  pub fn resolved(&self) -> ReportRow {
    ReportRow {
      method: self.method.clone(),
      mean_ms: self.mean_ms.unwrap_or(0.0),
      stddev_ms: self.stddev_ms.unwrap_or(0.0),
      ci95_ms: self.ci95_ms.unwrap_or(0.0),
      fallback_pct: self.fallback_pct.unwrap_or(0.0),
      accuracy_pct: self.accuracy_pct.unwrap_or(100.0),
      samples: self.samples,
    }
  }
}

/// Half-width of the 95% confidence interval for a mean.
///
/// `None` when the standard deviation is missing or `samples <= 0`.
pub fn compute_ci95(stddev: Option<f64>, samples: i64) -> Option<f64> {
  let stddev = stddev?;
  if samples <= 0 {
    return None;
  }
  Some(Z_95 * stddev / (samples as f64).sqrt())
}

/// Group rows by method and summarize each group.
///
/// Mean, std-dev, fallback, accuracy and source CI95 are averaged across the
/// method's rows (a mean of means, not a weighted grand mean); samples take
/// the maximum. Rows without a method are dropped. The result is sorted
/// ascending by mean runtime.
///
/// Returns `None` if the frame has no `Method` column.
pub fn aggregate(frame: &Frame, assume_n: i64) -> Option<Vec<SummaryRow>> {
  let methods = frame.methods()?;

  let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
  for (idx, method) in methods.iter().enumerate() {
    if !method.is_empty() {
      groups.entry(method.as_str()).or_default().push(idx);
    }
  }

  let column_mean = |name: &str, rows: &[usize]| mean_of(frame.numeric(name), rows);

  let mut summary: Vec<SummaryRow> = groups
    .into_iter()
    .map(|(method, rows)| {
      let stddev_ms = column_mean(STDDEV_MS, &rows);
      let samples = max_of(frame.numeric(SAMPLES), &rows).map_or(assume_n, |n| n as i64);
      let ci95_ms = column_mean(CI95_MS, &rows).or_else(|| compute_ci95(stddev_ms, samples));

      debug!("Aggregated {} row(s) for {}", rows.len(), method);
      SummaryRow {
        method: method.to_string(),
        mean_ms: column_mean(MEAN_MS, &rows),
        stddev_ms,
        fallback_pct: column_mean(FALLBACK_PCT, &rows),
        accuracy_pct: column_mean(ACCURACY_PCT, &rows),
        samples,
        ci95_ms,
      }
    })
    .collect();

  summary.sort_by(|a, b| a.mean_ms.unwrap_or(0.0).total_cmp(&b.mean_ms.unwrap_or(0.0)));
  Some(summary)
}

fn present<'a>(column: Option<&'a [Option<f64>]>, rows: &'a [usize]) -> impl Iterator<Item = f64> + 'a {
  rows.iter().filter_map(move |&idx| column.and_then(|values| values[idx]))
}

fn mean_of(column: Option<&[Option<f64>]>, rows: &[usize]) -> Option<f64> {
  let (sum, count) = present(column, rows).fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
  (count > 0).then(|| sum / count as f64)
}

fn max_of(column: Option<&[Option<f64>]>, rows: &[usize]) -> Option<f64> {
  present(column, rows).reduce(f64::max)
}
