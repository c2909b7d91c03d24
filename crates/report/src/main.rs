//! Benchmark report generator for hybrid string validation.
//!
//! Finds the newest benchmark CSV under `data/` or `experiments/` (or takes
//! `--csv`), summarizes it per method and writes plots, a markdown report and
//! a LaTeX table under `<outdir>/reports` and `<outdir>/plots`.

use std::path::PathBuf;

use clap::Parser;
use hybrid_report::{ReportConfig, pipeline};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "hybrid-report")]
#[command(about = "Summarize regex/hybrid/DFA validation benchmarks into plots and reports")]
#[command(version)]
struct Cli {
  /// Path to CSV report (skips the search)
  #[arg(long)]
  csv: Option<PathBuf>,

  /// Output folder base [default: experiments]
  #[arg(long)]
  outdir: Option<PathBuf>,

  /// Assume N (repetitions) if not present in CSV [default: 30]
  #[arg(long)]
  assume_n: Option<i64>,

  /// Directory to search for CSVs (repeatable) [default: data, experiments]
  #[arg(long = "search-path")]
  search_paths: Vec<PathBuf>,

  /// TOML config file
  #[arg(long)]
  config: Option<PathBuf>,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  // Setup logging
  let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
  let subscriber = FmtSubscriber::builder()
    .with_max_level(level)
    .with_target(false)
    .finish();
  tracing::subscriber::set_global_default(subscriber)?;

  let mut config = match &cli.config {
    Some(path) => ReportConfig::load(path)?,
    None => ReportConfig::default(),
  };
  if let Some(outdir) = cli.outdir {
    config.outdir = outdir;
  }
  if let Some(assume_n) = cli.assume_n {
    config.assume_n = assume_n;
  }
  if !cli.search_paths.is_empty() {
    config.search_paths = cli.search_paths;
  }

  let outcome = pipeline::run(&config, cli.csv.as_deref())?;
  println!("{}", outcome);

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::CommandFactory;

  #[test]
  fn test_cli_definition() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_cli_flags() {
    let cli = Cli::parse_from([
      "hybrid-report",
      "--csv",
      "bench.csv",
      "--outdir",
      "out",
      "--assume-n",
      "12",
      "--search-path",
      "a",
      "--search-path",
      "b",
    ]);
    assert_eq!(cli.csv, Some(PathBuf::from("bench.csv")));
    assert_eq!(cli.outdir, Some(PathBuf::from("out")));
    assert_eq!(cli.assume_n, Some(12));
    assert_eq!(cli.search_paths, vec![PathBuf::from("a"), PathBuf::from("b")]);
    assert!(!cli.verbose);
  }
}
