//! Locating the benchmark CSV to report on.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

/// Find the most recently modified `.csv` file under any of `search_paths`.
///
/// Directories are walked recursively. Paths that don't exist and entries
/// that can't be read are skipped. Returns `None` when nothing matches.
pub fn find_latest_csv(search_paths: &[PathBuf]) -> Option<PathBuf> {
  search_paths
    .iter()
    .filter(|p| p.exists())
    .flat_map(|root| csv_files(root))
    .max_by_key(|(_, modified)| *modified)
    .map(|(path, _)| path)
}

fn csv_files(root: &Path) -> Vec<(PathBuf, SystemTime)> {
  let walker = walkdir::WalkDir::new(root).follow_links(false).into_iter();

  let mut files = Vec::new();
  for entry in walker.filter_map(|e| e.ok()) {
    if !entry.file_type().is_file() || !is_csv(entry.path()) {
      continue;
    }
    let Some(modified) = entry.metadata().ok().and_then(|m| m.modified().ok()) else {
      continue;
    };
    debug!("Candidate CSV: {}", entry.path().display());
    files.push((entry.into_path(), modified));
  }
  files
}

fn is_csv(path: &Path) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs::File;
  use std::time::Duration;
  use tempfile::TempDir;

  fn touch(path: &Path, age_secs: u64) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, "Method,Mean\n").unwrap();
    let mtime = SystemTime::now() - Duration::from_secs(age_secs);
    File::options().write(true).open(path).unwrap().set_modified(mtime).unwrap();
  }

  #[test]
  fn test_picks_newest_across_paths() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    let experiments = temp.path().join("experiments");

    touch(&data.join("old.csv"), 3600);
    touch(&experiments.join("nested/deep/new.csv"), 10);
    touch(&experiments.join("middle.csv"), 600);

    let found = find_latest_csv(&[data, experiments.clone()]).unwrap();
    assert_eq!(found, experiments.join("nested/deep/new.csv"));
  }

  #[test]
  fn test_ignores_other_extensions() {
    let temp = TempDir::new().unwrap();
    touch(&temp.path().join("report.csv"), 600);
    touch(&temp.path().join("notes.txt"), 1);
    touch(&temp.path().join("UPPER.CSV"), 300);

    let found = find_latest_csv(&[temp.path().to_path_buf()]).unwrap();
    assert_eq!(found, temp.path().join("UPPER.CSV"));
  }

  #[test]
  fn test_none_when_empty_or_missing() {
    let temp = TempDir::new().unwrap();
    assert!(find_latest_csv(&[temp.path().to_path_buf()]).is_none());
    assert!(find_latest_csv(&[temp.path().join("does-not-exist")]).is_none());
    assert!(find_latest_csv(&[]).is_none());
  }
}
