//! Markdown report generation.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::Result;
use crate::aggregate::ReportRow;

/// Where the data came from and when the report was made.
#[derive(Debug, Clone)]
pub struct ReportMeta {
  /// Path of the source CSV as given or discovered
  pub csv_file: String,
  /// File stem of the source CSV
  pub dataset_name: String,
  pub generated_at: DateTime<Local>,
}

impl ReportMeta {
  pub fn for_csv(csv_path: &Path) -> Self {
    Self {
      csv_file: csv_path.display().to_string(),
      dataset_name: dataset_stem(csv_path),
      generated_at: Local::now(),
    }
  }
}

/// File stem used to name every output of a run.
pub fn dataset_stem(csv_path: &Path) -> String {
  csv_path
    .file_stem()
    .map(|s| s.to_string_lossy().into_owned())
    .unwrap_or_else(|| "unknown".to_string())
}

/// Markdown report generator.
pub struct MarkdownReport {
  content: String,
}

impl MarkdownReport {
  /// Build the report. `plots` are referenced relative to the sibling
  /// `plots/` directory.
  pub fn from_summary(rows: &[ReportRow], plots: &[PathBuf], meta: &ReportMeta) -> Self {
    let mut content = String::new();

    Self::write_header(&mut content, meta);
    Self::write_results_table(&mut content, rows);
    Self::write_plots(&mut content, plots);
    Self::write_observations(&mut content);
    Self::write_example_summary(&mut content, rows, meta);

    Self { content }
  }

  fn write_header(out: &mut String, meta: &ReportMeta) {
    let _ = writeln!(out, "# Hybrid Validation Benchmark Summary");
    let _ = writeln!(out);
    let _ = writeln!(out, "- Dataset file: `{}`", meta.csv_file);
    let _ = writeln!(out, "- Generated: {}", meta.generated_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out);
  }

  fn write_results_table(out: &mut String, rows: &[ReportRow]) {
    let _ = writeln!(out, "## Aggregated Results");
    let _ = writeln!(out);
    let _ = writeln!(
      out,
      "| Method | Mean (ms) | Std. Dev. (ms) | 95% CI (ms) | Fallback (%) | Accuracy (%) |"
    );
    let _ = writeln!(out, "|---|---:|---:|---:|---:|---:|");

    for row in rows {
      let _ = writeln!(
        out,
        "| {} | {:.3} | {:.3} | {:.3} | {:.2} | {:.2} |",
        row.method, row.mean_ms, row.stddev_ms, row.ci95_ms, row.fallback_pct, row.accuracy_pct
      );
    }
    let _ = writeln!(out);
  }

  fn write_plots(out: &mut String, plots: &[PathBuf]) {
    for plot in plots {
      let name = plot
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
      let _ = writeln!(out, "![{}](../plots/{})", name, name);
      let _ = writeln!(out);
    }
  }

  fn write_observations(out: &mut String) {
    let _ = writeln!(out, "## Observations");
    let _ = writeln!(out);
    let _ = writeln!(
      out,
      "- Cached Regex typically has the lowest average runtime on short inputs."
    );
    let _ = writeln!(
      out,
      "- DFA-only provides predictable linear scaling and is robust to adversarial inputs."
    );
    let _ = writeln!(
      out,
      "- Hybrid (Regex→DFA) gives safety against ReDoS while adding modest overhead; fallback rate shows how often DFA was used."
    );
    let _ = writeln!(out);
  }

  fn write_example_summary(out: &mut String, rows: &[ReportRow], meta: &ReportMeta) {
    let _ = writeln!(out, "## Example summary");
    let _ = writeln!(out);
    let _ = writeln!(out, "```");
    let _ = writeln!(out, "### Summary: Hybrid Validation Benchmark");
    let _ = writeln!(out, "- Dataset: {}", meta.dataset_name);
    for row in rows {
      let _ = writeln!(out, "- {}: {:.3} ± {:.3} ms", row.method, row.mean_ms, row.stddev_ms);
    }
    let _ = writeln!(out, "```");
  }

  /// Save to a markdown file.
  pub fn save(&self, path: &Path) -> Result<()> {
    std::fs::write(path, &self.content)?;
    Ok(())
  }

  /// Get the markdown content.
  pub fn content(&self) -> &str {
    &self.content
  }
}
