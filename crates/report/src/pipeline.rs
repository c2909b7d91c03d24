//! End-to-end report run: locate, normalize, aggregate, render.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::Result;
use crate::aggregate::{ReportRow, aggregate};
use crate::config::ReportConfig;
use crate::locate::find_latest_csv;
use crate::normalize::Frame;
use crate::render::markdown::dataset_stem;
use crate::render::summary_csv::write_summary_csv;
use crate::render::{LatexTable, MarkdownReport, ReportMeta, chart};
use crate::scaling::ScalingData;
use crate::table::RawTable;

/// Files written by a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFiles {
  pub source_csv: PathBuf,
  pub summary_csv: PathBuf,
  pub plots: Vec<PathBuf>,
  pub markdown: PathBuf,
  pub latex: PathBuf,
}

/// How a run ended. Only `Generated` writes anything to disk.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
  /// No CSV supplied and none found under the search paths.
  NoCsv { search_paths: Vec<PathBuf> },
  /// The CSV has no column that maps to `Method`.
  MissingMethod { csv: PathBuf },
  Generated(GeneratedFiles),
}

/// User-facing summary of the run, printed by the CLI.
impl fmt::Display for Outcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Outcome::NoCsv { search_paths } => {
        let searched: Vec<String> = search_paths.iter().map(|p| format!("{}/", p.display())).collect();
        write!(
          f,
          "No CSV found under {}. Drop a CSV (report_table*.csv) and retry or pass --csv",
          searched.join(" or ")
        )
      }
      Outcome::MissingMethod { csv } => {
        writeln!(f, "Using CSV: {}", csv.display())?;
        write!(f, "CSV missing Method column; aborting")
      }
      Outcome::Generated(files) => {
        let plots: Vec<String> = files.plots.iter().map(|p| p.display().to_string()).collect();
        writeln!(f, "Using CSV: {}", files.source_csv.display())?;
        writeln!(f, "Generated:")?;
        writeln!(f, " - cleaned summary csv: {}", files.summary_csv.display())?;
        writeln!(f, " - plots: {}", plots.join(", "))?;
        writeln!(f, " - markdown report: {}", files.markdown.display())?;
        write!(f, " - latex table: {}", files.latex.display())
      }
    }
  }
}

/// Run the whole pipeline. `explicit_csv` bypasses the search entirely.
pub fn run(config: &ReportConfig, explicit_csv: Option<&Path>) -> Result<Outcome> {
  let csv_path = match explicit_csv {
    Some(path) => path.to_path_buf(),
    None => match find_latest_csv(&config.search_paths) {
      Some(path) => path,
      None => {
        warn!("No CSV found under {:?}", config.search_paths);
        return Ok(Outcome::NoCsv {
          search_paths: config.search_paths.clone(),
        });
      }
    },
  };
  info!("Using CSV: {}", csv_path.display());

  let raw = RawTable::from_path(&csv_path)?;
  let frame = Frame::from_raw(&raw);

  let scaling = ScalingData::from_frame(&frame);

  let Some(summary) = aggregate(&frame, config.assume_n) else {
    warn!("CSV missing Method column: {}", csv_path.display());
    return Ok(Outcome::MissingMethod { csv: csv_path });
  };
  info!("Aggregated {} method(s) from {} row(s)", summary.len(), frame.len());

  let reports_dir = config.reports_dir();
  let plots_dir = config.plots_dir();
  std::fs::create_dir_all(&reports_dir)?;
  std::fs::create_dir_all(&plots_dir)?;

  let stem = dataset_stem(&csv_path);

  let summary_csv = reports_dir.join(format!("summary_{}.csv", stem));
  write_summary_csv(&summary, &summary_csv)?;

  let rows: Vec<ReportRow> = summary.iter().map(|r| r.resolved()).collect();

  let runtime_plot = plots_dir.join(format!("runtime_comparison_{}.png", stem));
  chart::bar_chart(
    &rows,
    &format!("Average Validation Time per Method ({})", stem),
    config.chart.width,
    config.chart.height,
    &runtime_plot,
  )?;
  let mut plots = vec![runtime_plot];

  match scaling {
    ScalingData::NotDetailed => {}
    ScalingData::MissingRuntime => {
      warn!("Detailed CSV present but Runtime_ms column missing; skipping scaling plot");
    }
    ScalingData::Series(series) => {
      let scaling_plot = plots_dir.join(format!("runtime_scaling_{}.png", stem));
      chart::scaling_plot(
        &series,
        &format!("Runtime scaling ({})", stem),
        config.chart.scaling_width,
        config.chart.scaling_height,
        &scaling_plot,
      )?;
      plots.push(scaling_plot);
    }
  }

  let markdown = reports_dir.join(format!("hybrid_validation_summary_{}.md", stem));
  MarkdownReport::from_summary(&rows, &plots, &ReportMeta::for_csv(&csv_path)).save(&markdown)?;

  let latex = reports_dir.join(format!("hybrid_validation_table_{}.tex", stem));
  LatexTable::from_summary(&rows).save(&latex)?;

  Ok(Outcome::Generated(GeneratedFiles {
    source_csv: csv_path,
    summary_csv,
    plots,
    markdown,
    latex,
  }))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_no_csv_message() {
    let outcome = Outcome::NoCsv {
      search_paths: vec![PathBuf::from("data"), PathBuf::from("experiments")],
    };
    assert_eq!(
      outcome.to_string(),
      "No CSV found under data/ or experiments/. Drop a CSV (report_table*.csv) and retry or pass --csv"
    );
  }

  #[test]
  fn test_missing_method_message() {
    let outcome = Outcome::MissingMethod {
      csv: PathBuf::from("data/bench.csv"),
    };
    assert_eq!(
      outcome.to_string(),
      "Using CSV: data/bench.csv\nCSV missing Method column; aborting"
    );
  }

  #[test]
  fn test_generated_message_lists_files() {
    let outcome = Outcome::Generated(GeneratedFiles {
      source_csv: PathBuf::from("data/bench.csv"),
      summary_csv: PathBuf::from("out/reports/summary_bench.csv"),
      plots: vec![
        PathBuf::from("out/plots/runtime_comparison_bench.png"),
        PathBuf::from("out/plots/runtime_scaling_bench.png"),
      ],
      markdown: PathBuf::from("out/reports/hybrid_validation_summary_bench.md"),
      latex: PathBuf::from("out/reports/hybrid_validation_table_bench.tex"),
    });
    let message = outcome.to_string();
    assert!(message.starts_with("Using CSV: data/bench.csv\nGenerated:\n"));
    assert!(message.contains(" - plots: out/plots/runtime_comparison_bench.png, out/plots/runtime_scaling_bench.png"));
    assert!(message.ends_with(" - latex table: out/reports/hybrid_validation_table_bench.tex"));
  }

  #[test]
  fn test_no_csv_run_reports_default_paths() {
    let temp = tempfile::TempDir::new().unwrap();
    let config = ReportConfig {
      search_paths: vec![temp.path().join("data"), temp.path().join("experiments")],
      outdir: temp.path().join("experiments"),
      ..ReportConfig::default()
    };

    let outcome = run(&config, None).unwrap();

    let message = outcome.to_string();
    assert!(message.starts_with("No CSV found under "));
    assert!(message.contains(&format!("{}/ or ", temp.path().join("data").display())));
    assert!(message.ends_with("retry or pass --csv"));
  }
}
