//! Output rendering.
//!
//! - Charts: PNG bar chart and log-log scaling plot
//! - Markdown: human-readable summary embedding the charts
//! - LaTeX: `tabular` for papers
//! - Summary CSV: the aggregated rows, missing values left blank

pub mod chart;
mod font;
pub mod latex;
pub mod markdown;
pub mod summary_csv;

use image::Rgb;

pub use latex::LatexTable;
pub use markdown::{MarkdownReport, ReportMeta};

/// Regex-based methods.
pub const BLUE: Rgb<u8> = Rgb([0x4C, 0x72, 0xB0]);
/// Hybrid methods.
pub const GREEN: Rgb<u8> = Rgb([0x55, 0xA8, 0x68]);
/// Everything else (DFA and friends).
pub const RED: Rgb<u8> = Rgb([0xC4, 0x4E, 0x52]);

/// Chart color for a method, keyed on its name.
pub fn method_color(method: &str) -> Rgb<u8> {
  let lower = method.to_lowercase();
  if lower.contains("regex") {
    BLUE
  } else if lower.contains("hybrid") {
    GREEN
  } else {
    RED
  }
}
