//! Report configuration.
//!
//! Priority: CLI flags > `--config` TOML file > built-in defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::Result;

/// Default repetition count assumed when the CSV has no sample column.
pub const DEFAULT_ASSUME_N: i64 = 30;

/// Top-level configuration for a report run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
  /// Base directory for `reports/` and `plots/`
  pub outdir: PathBuf,

  /// Sample count used when the source has none
  pub assume_n: i64,

  /// Directories scanned for the newest CSV
  pub search_paths: Vec<PathBuf>,

  /// Plot dimensions
  pub chart: ChartConfig,
}

impl Default for ReportConfig {
  fn default() -> Self {
    Self {
      outdir: PathBuf::from("experiments"),
      assume_n: DEFAULT_ASSUME_N,
      search_paths: vec![PathBuf::from("data"), PathBuf::from("experiments")],
      chart: ChartConfig::default(),
    }
  }
}

/// Pixel dimensions of the generated plots.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
  /// Bar chart width
  pub width: u32,
  /// Bar chart height
  pub height: u32,
  /// Scaling plot width
  pub scaling_width: u32,
  /// Scaling plot height
  pub scaling_height: u32,
}

impl Default for ChartConfig {
  fn default() -> Self {
    Self {
      width: 1600,
      height: 1000,
      scaling_width: 1600,
      scaling_height: 1200,
    }
  }
}

impl ReportConfig {
  /// Load configuration from a TOML file. Missing keys keep their defaults.
  pub fn load(path: &Path) -> Result<Self> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
  }

  /// Directory receiving the markdown, LaTeX and summary CSV outputs.
  pub fn reports_dir(&self) -> PathBuf {
    self.outdir.join("reports")
  }

  /// Directory receiving the PNG plots.
  pub fn plots_dir(&self) -> PathBuf {
    self.outdir.join("plots")
  }
}
