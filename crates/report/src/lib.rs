//! Report generator for hybrid string-validation benchmarks.
//!
//! Takes a CSV of timing measurements comparing regex, hybrid and DFA
//! validators and turns it into plots, a markdown summary and a LaTeX table.
//!
//! ## Pipeline
//!
//! - **Locate**: pick the newest CSV under the search paths (or an explicit one)
//! - **Normalize**: canonical column names, numbers pulled out of text cells
//! - **Aggregate**: per-method mean/std/CI95/fallback/accuracy
//! - **Render**: bar chart, log-log scaling plot, markdown, LaTeX, cleaned CSV

pub mod aggregate;
pub mod config;
pub mod locate;
pub mod normalize;
pub mod pipeline;
pub mod render;
pub mod scaling;
pub mod table;

pub use aggregate::{ReportRow, SummaryRow, aggregate, compute_ci95};
pub use config::ReportConfig;
pub use locate::find_latest_csv;
pub use normalize::{Frame, canonical_name, extract_number};
pub use pipeline::{GeneratedFiles, Outcome, run};
pub use table::RawTable;

use thiserror::Error;

/// Report generation errors
#[derive(Debug, Error)]
pub enum ReportError {
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("CSV error: {0}")]
  Csv(#[from] csv::Error),

  #[error("Image error: {0}")]
  Image(#[from] image::ImageError),

  #[error("TOML parse error: {0}")]
  Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
