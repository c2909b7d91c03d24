//! LaTeX `tabular` output.

use std::fmt::Write as _;
use std::path::Path;

use crate::Result;
use crate::aggregate::ReportRow;

/// Booktabs-style table of the summary rows.
pub struct LatexTable {
  content: String,
}

impl LatexTable {
  pub fn from_summary(rows: &[ReportRow]) -> Self {
    let mut out = String::new();

    let _ = writeln!(out, "\\begin{{tabular}}{{lrrrrr}}");
    let _ = writeln!(out, "\\toprule");
    let _ = writeln!(
      out,
      "Method & Mean (ms) & StdDev (ms) & CI95 (ms) & Fallback (\\%) & Accuracy (\\%) \\\\"
    );
    let _ = writeln!(out, "\\midrule");
    for row in rows {
      let _ = writeln!(
        out,
        "{} & {:.3} & {:.3} & {:.3} & {:.2} & {:.2} \\\\",
        escape(&row.method),
        row.mean_ms,
        row.stddev_ms,
        row.ci95_ms,
        row.fallback_pct,
        row.accuracy_pct
      );
    }
    let _ = writeln!(out, "\\bottomrule");
    let _ = writeln!(out, "\\end{{tabular}}");

    Self { content: out }
  }

  pub fn save(&self, path: &Path) -> Result<()> {
    std::fs::write(path, &self.content)?;
    Ok(())
  }

  pub fn content(&self) -> &str {
    &self.content
  }
}

/// Escape characters that are special in LaTeX text mode.
fn escape(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
        out.push('\\');
        out.push(c);
      }
      '~' => out.push_str("\\textasciitilde{}"),
      '^' => out.push_str("\\textasciicircum{}"),
      '\\' => out.push_str("\\textbackslash{}"),
      _ => out.push(c),
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  fn row(method: &str) -> ReportRow {
    ReportRow {
      method: method.to_string(),
      mean_ms: 5.2,
      stddev_ms: 0.3,
      ci95_ms: 0.1073,
      fallback_pct: 0.0,
      accuracy_pct: 99.5,
      samples: 30,
    }
  }

  #[test]
  fn test_tabular_layout() {
    let table = LatexTable::from_summary(&[row("Regex")]);
    let lines: Vec<&str> = table.content().lines().collect();

    assert_eq!(lines[0], "\\begin{tabular}{lrrrrr}");
    assert_eq!(lines[1], "\\toprule");
    assert_eq!(
      lines[2],
      "Method & Mean (ms) & StdDev (ms) & CI95 (ms) & Fallback (\\%) & Accuracy (\\%) \\\\"
    );
    assert_eq!(lines[3], "\\midrule");
    assert_eq!(lines[4], "Regex & 5.200 & 0.300 & 0.107 & 0.00 & 99.50 \\\\");
    assert_eq!(lines[5], "\\bottomrule");
    assert_eq!(lines[6], "\\end{tabular}");
  }

  #[test]
  fn test_method_escaped() {
    assert_eq!(escape("regex_cached & DFA"), "regex\\_cached \\& DFA");
    assert_eq!(escape("a~b"), "a\\textasciitilde{}b");
    let table = LatexTable::from_summary(&[row("100% DFA")]);
    assert!(table.content().contains("100\\% DFA & 5.200"));
  }
}
