//! PNG charts: mean runtime bars and log-log runtime scaling.

use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};

use super::font::{self, ADVANCE, GLYPH_HEIGHT};
use super::method_color;
use crate::Result;
use crate::aggregate::ReportRow;
use crate::scaling::ScalingSeries;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([30, 30, 30]);
const GRID: Rgb<u8> = Rgb([225, 225, 230]);
const AXIS: Rgb<u8> = Rgb([90, 90, 90]);

/// Horizontal anchoring of a text run relative to its anchor point.
#[derive(Debug, Clone, Copy)]
enum Align {
  Left,
  Center,
  Right,
}

/// Plot area inside the image, in pixels.
#[derive(Debug, Clone, Copy)]
struct PlotArea {
  left: f64,
  top: f64,
  right: f64,
  bottom: f64,
}

impl PlotArea {
  fn width(&self) -> f64 {
    self.right - self.left
  }

  fn height(&self) -> f64 {
    self.bottom - self.top
  }
}

struct Canvas {
  img: RgbImage,
  /// Font scale: one glyph pixel becomes `scale` x `scale` image pixels.
  scale: f64,
}

impl Canvas {
  fn new(width: u32, height: u32) -> Self {
    let img = RgbImage::from_pixel(width.max(1), height.max(1), WHITE);
    let scale = (f64::from(width.min(height)) / 330.0).round().max(1.0);
    Self { img, scale }
  }

  fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < self.img.width() && (y as u32) < self.img.height() {
      self.img.put_pixel(x as u32, y as u32, color);
    }
  }

  fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb<u8>) {
    let (x0, x1) = (x0.min(x1).round() as i64, x0.max(x1).round() as i64);
    let (y0, y1) = (y0.min(y1).round() as i64, y0.max(y1).round() as i64);
    for y in y0..=y1 {
      for x in x0..=x1 {
        self.put(x, y, color);
      }
    }
  }

  fn disc(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb<u8>) {
    let r = radius.ceil() as i64;
    let (cx_i, cy_i) = (cx.round() as i64, cy.round() as i64);
    for dy in -r..=r {
      for dx in -r..=r {
        if ((dx * dx + dy * dy) as f64) <= radius * radius {
          self.put(cx_i + dx, cy_i + dy, color);
        }
      }
    }
  }

  fn line(&mut self, from: (f64, f64), to: (f64, f64), thickness: f64, color: Rgb<u8>) {
    if ![from.0, from.1, to.0, to.1].iter().all(|v| v.is_finite()) {
      return;
    }
    let steps = (to.0 - from.0).abs().max((to.1 - from.1).abs()).ceil().max(1.0) as usize;
    for i in 0..=steps {
      let t = i as f64 / steps as f64;
      let x = from.0 + (to.0 - from.0) * t;
      let y = from.1 + (to.1 - from.1) * t;
      self.disc(x, y, thickness / 2.0, color);
    }
  }

  /// Draw `text` anchored at `(x, y)`, vertically centered on the anchor and
  /// rotated counter-clockwise by `angle_deg` around it.
  #[allow(clippy::too_many_arguments)]
  fn text(&mut self, text: &str, x: f64, y: f64, align: Align, angle_deg: f64, scale: f64, color: Rgb<u8>) {
    let width = f64::from(font::text_width(text)) * scale;
    let height = f64::from(GLYPH_HEIGHT) * scale;
    let start_x = match align {
      Align::Left => 0.0,
      Align::Center => -width / 2.0,
      Align::Right => -width,
    };
    let start_y = -height / 2.0;
    let (sin, cos) = angle_deg.to_radians().sin_cos();

    for (i, c) in text.chars().enumerate() {
      let glyph = font::glyph(c);
      let glyph_x = start_x + (i as u32 * ADVANCE) as f64 * scale;
      for (row, bits) in glyph.iter().enumerate() {
        for col in 0..font::GLYPH_WIDTH {
          if bits & (1 << (font::GLYPH_WIDTH - 1 - col)) == 0 {
            continue;
          }
          // Half-pixel sub-steps keep rotated glyph cells free of holes.
          let cell_x = glyph_x + f64::from(col) * scale;
          let cell_y = start_y + row as f64 * scale;
          let mut sy = 0.0;
          while sy < scale {
            let mut sx = 0.0;
            while sx < scale {
              let lx = cell_x + sx;
              let ly = cell_y + sy;
              let px = x + lx * cos + ly * sin;
              let py = y - lx * sin + ly * cos;
              self.put(px.round() as i64, py.round() as i64, color);
              sx += 0.5;
            }
            sy += 0.5;
          }
        }
      }
    }
  }

  fn save(&self, path: &Path) -> Result<()> {
    self.img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
  }
}

/// A round step size (1, 2 or 5 times a power of ten) near `raw`.
fn nice_step(raw: f64) -> f64 {
  if raw <= 0.0 || !raw.is_finite() {
    return 1.0;
  }
  let magnitude = 10f64.powf(raw.log10().floor());
  let fraction = raw / magnitude;
  let nice = if fraction <= 1.0 {
    1.0
  } else if fraction <= 2.0 {
    2.0
  } else if fraction <= 5.0 {
    5.0
  } else {
    10.0
  };
  nice * magnitude
}

fn tick_label(value: f64, step: f64) -> String {
  let decimals = if step >= 1.0 {
    0
  } else {
    (-step.log10()).ceil() as usize
  };
  format!("{:.*}", decimals, value)
}

fn decade_label(exponent: i32) -> String {
  if (-3..=5).contains(&exponent) {
    let value = 10f64.powi(exponent);
    let decimals = if exponent < 0 { (-exponent) as usize } else { 0 };
    format!("{:.*}", decimals, value)
  } else {
    format!("1E{}", exponent)
  }
}

fn plot_area(width: u32, height: u32, scale: f64, bottom_margin: f64) -> PlotArea {
  let (w, h) = (f64::from(width), f64::from(height));
  PlotArea {
    left: 26.0 * scale,
    top: 22.0 * scale,
    right: w - 8.0 * scale,
    bottom: h - bottom_margin,
  }
}

fn draw_frame(canvas: &mut Canvas, area: PlotArea, title: &str, y_label: &str) {
  let s = canvas.scale;
  let img_width = f64::from(canvas.img.width());
  canvas.text(title, img_width / 2.0, 10.0 * s, Align::Center, 0.0, s * 1.4, BLACK);
  canvas.text(
    y_label,
    6.0 * s,
    area.top + area.height() / 2.0,
    Align::Center,
    90.0,
    s,
    BLACK,
  );
  canvas.line((area.left, area.top), (area.left, area.bottom), 2.0, AXIS);
  canvas.line((area.left, area.bottom), (area.right, area.bottom), 2.0, AXIS);
}

/// Render one bar per method with standard-deviation error bars.
pub fn bar_chart(rows: &[ReportRow], title: &str, width: u32, height: u32, path: &Path) -> Result<()> {
  let mut canvas = Canvas::new(width, height);
  let s = canvas.scale;

  let longest = rows.iter().map(|r| r.method.chars().count()).max().unwrap_or(0) as f64;
  // Rotated labels hang below the axis; leave room for the longest one.
  let label_drop = (longest * f64::from(ADVANCE) * s * 25f64.to_radians().sin()).max(4.0 * s);
  let bottom_margin = (label_drop + 14.0 * s).min(f64::from(height) * 0.45);
  let area = plot_area(width, height, s, bottom_margin);

  // Sums of huge means can still overflow; such bars are drawn at zero.
  let top_value = rows
    .iter()
    .map(|r| r.mean_ms + r.stddev_ms.max(0.0))
    .filter(|v| v.is_finite())
    .fold(0.0, f64::max);
  let headroom = (top_value * 1.1).min(f64::MAX);
  let step = nice_step(if top_value > 0.0 { headroom / 5.0 } else { 0.2 });
  let y_max = ((headroom / step).ceil().max(1.0) * step).min(f64::MAX);
  let to_y = |v: f64| {
    let v = if v.is_finite() { v.clamp(0.0, y_max) } else { 0.0 };
    area.bottom - (v / y_max) * area.height()
  };

  let mut tick = 0.0;
  while tick <= y_max + step * 1e-9 {
    let y = to_y(tick);
    canvas.line((area.left, y), (area.right, y), 1.0, GRID);
    canvas.text(&tick_label(tick, step), area.left - 3.0 * s, y, Align::Right, 0.0, s, BLACK);
    tick += step;
  }

  draw_frame(&mut canvas, area, title, "Mean Runtime (ms)");

  let slot = area.width() / rows.len().max(1) as f64;
  let bar_width = slot * 0.6;
  for (i, row) in rows.iter().enumerate() {
    let center = area.left + slot * (i as f64 + 0.5);
    let color = method_color(&row.method);
    canvas.fill_rect(center - bar_width / 2.0, to_y(row.mean_ms), center + bar_width / 2.0, area.bottom, color);

    if row.stddev_ms > 0.0 {
      let (low, high) = (to_y(row.mean_ms - row.stddev_ms), to_y(row.mean_ms + row.stddev_ms));
      let cap = bar_width * 0.15;
      canvas.line((center, low), (center, high), 2.0, BLACK);
      canvas.line((center - cap, low), (center + cap, low), 2.0, BLACK);
      canvas.line((center - cap, high), (center + cap, high), 2.0, BLACK);
    }

    canvas.text(&row.method, center, area.bottom + 6.0 * s, Align::Right, 25.0, s, BLACK);
  }

  canvas.save(path)
}

/// Render mean runtime against input length on log-log axes, one line per
/// method. Points with non-positive or non-finite coordinates are skipped.
pub fn scaling_plot(series: &[ScalingSeries], title: &str, width: u32, height: u32, path: &Path) -> Result<()> {
  let mut canvas = Canvas::new(width, height);
  let s = canvas.scale;
  let area = plot_area(width, height, s, 24.0 * s);

  let log_series: Vec<(&str, Vec<(f64, f64)>)> = series
    .iter()
    .map(|ser| {
      let points = ser
        .points
        .iter()
        .filter(|(x, y)| *x > 0.0 && *y > 0.0 && x.is_finite() && y.is_finite())
        .map(|(x, y)| (x.log10(), y.log10()))
        .collect();
      (ser.method.as_str(), points)
    })
    .collect();

  let all_points = || log_series.iter().flat_map(|(_, pts)| pts.iter().copied());
  let (x_range, y_range) = (
    log_range(all_points().map(|p| p.0)),
    log_range(all_points().map(|p| p.1)),
  );

  let to_px = |(lx, ly): (f64, f64)| {
    let x = area.left + (lx - x_range.0) / (x_range.1 - x_range.0) * area.width();
    let y = area.bottom - (ly - y_range.0) / (y_range.1 - y_range.0) * area.height();
    (x, y)
  };

  for exponent in (x_range.0.ceil() as i32)..=(x_range.1.floor() as i32) {
    let (x, _) = to_px((f64::from(exponent), y_range.0));
    canvas.line((x, area.top), (x, area.bottom), 1.0, GRID);
    canvas.text(&decade_label(exponent), x, area.bottom + 6.0 * s, Align::Center, 0.0, s, BLACK);
  }
  for exponent in (y_range.0.ceil() as i32)..=(y_range.1.floor() as i32) {
    let (_, y) = to_px((x_range.0, f64::from(exponent)));
    canvas.line((area.left, y), (area.right, y), 1.0, GRID);
    canvas.text(&decade_label(exponent), area.left - 3.0 * s, y, Align::Right, 0.0, s, BLACK);
  }

  draw_frame(&mut canvas, area, title, "Mean Runtime (ms)");
  canvas.text(
    "Input Length",
    area.left + area.width() / 2.0,
    area.bottom + 16.0 * s,
    Align::Center,
    0.0,
    s,
    BLACK,
  );

  for (method, points) in &log_series {
    let color = method_color(method);
    let pixels: Vec<(f64, f64)> = points.iter().map(|p| to_px(*p)).collect();
    for pair in pixels.windows(2) {
      canvas.line(pair[0], pair[1], 1.5 * s, color);
    }
    for &(x, y) in &pixels {
      canvas.disc(x, y, 3.0 * s, color);
    }
  }

  // Legend in the upper-left corner of the plot area.
  for (i, (method, _)) in log_series.iter().enumerate() {
    let y = area.top + (8.0 + 12.0 * i as f64) * s;
    let x = area.left + 6.0 * s;
    let color = method_color(method);
    canvas.line((x, y), (x + 12.0 * s, y), 1.5 * s, color);
    canvas.disc(x + 6.0 * s, y, 3.0 * s, color);
    canvas.text(method, x + 16.0 * s, y, Align::Left, 0.0, s, BLACK);
  }

  canvas.save(path)
}

/// Padded `(min, max)` of log-scale values; a decade either side when empty
/// or degenerate.
fn log_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
  let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
  if !min.is_finite() || !max.is_finite() {
    return (0.0, 1.0);
  }
  if max - min < 1e-9 {
    return (min - 0.5, max + 0.5);
  }
  let pad = (max - min) * 0.05;
  (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::render::{BLUE, GREEN, RED};
  use tempfile::TempDir;

  fn row(method: &str, mean: f64, std: f64) -> ReportRow {
    ReportRow {
      method: method.to_string(),
      mean_ms: mean,
      stddev_ms: std,
      ci95_ms: 0.0,
      fallback_pct: 0.0,
      accuracy_pct: 100.0,
      samples: 30,
    }
  }

  fn has_color(img: &RgbImage, color: [u8; 3]) -> bool {
    img.pixels().any(|p| p.0 == color)
  }

  #[test]
  fn test_nice_step() {
    for (raw, expected) in [(0.37, 0.5), (1.0, 1.0), (1.3, 2.0), (7.0, 10.0), (0.0, 1.0), (42.0, 50.0)] {
      assert!((nice_step(raw) - expected).abs() < 1e-12, "{raw}");
    }
  }

  #[test]
  fn test_labels() {
    assert_eq!(tick_label(2.0, 1.0), "2");
    assert_eq!(tick_label(0.25, 0.05), "0.25");
    assert_eq!(decade_label(2), "100");
    assert_eq!(decade_label(-2), "0.01");
    assert_eq!(decade_label(9), "1E9");
  }

  #[test]
  fn test_log_range() {
    assert_eq!(log_range(std::iter::empty()), (0.0, 1.0));
    assert_eq!(log_range([2.0].into_iter()), (1.5, 2.5));
    let (lo, hi) = log_range([1.0, 3.0].into_iter());
    assert!(lo < 1.0 && hi > 3.0);
  }

  #[test]
  fn test_bar_chart_palette() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bars.png");
    let rows = vec![
      row("Cached Regex", 1.0, 0.1),
      row("Hybrid", 2.0, 0.2),
      row("DFA", 3.0, 0.3),
    ];

    bar_chart(&rows, "Average Validation Time", 800, 500, &path).unwrap();

    let img = image::open(&path).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (800, 500));
    assert!(has_color(&img, BLUE.0));
    assert!(has_color(&img, GREEN.0));
    assert!(has_color(&img, RED.0));
  }

  #[test]
  fn test_bar_chart_handles_empty_and_zero() {
    let temp = TempDir::new().unwrap();
    bar_chart(&[], "Empty", 400, 300, &temp.path().join("empty.png")).unwrap();
    bar_chart(&[row("regex", 0.0, 0.0)], "Zero", 400, 300, &temp.path().join("zero.png")).unwrap();
    assert!(temp.path().join("empty.png").exists());
    assert!(temp.path().join("zero.png").exists());
  }

  #[test]
  fn test_scaling_plot() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("scaling.png");
    let series = vec![
      ScalingSeries {
        method: "Regex".to_string(),
        points: vec![(10.0, 0.1), (100.0, 1.0), (1000.0, 10.0)],
      },
      ScalingSeries {
        method: "Hybrid".to_string(),
        points: vec![(10.0, 0.2), (100.0, 0.0), (1000.0, 2.0)],
      },
    ];

    scaling_plot(&series, "Runtime scaling", 800, 600, &path).unwrap();

    let img = image::open(&path).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (800, 600));
    assert!(has_color(&img, BLUE.0));
    assert!(has_color(&img, GREEN.0));
    assert!(!has_color(&img, RED.0));
  }

  #[test]
  fn test_bar_chart_non_finite_values_terminate() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("overflow.png");
    let rows = vec![
      row("Regex", f64::INFINITY, 0.1),
      row("Hybrid", f64::MAX, f64::MAX),
      row("DFA", 2.0, f64::NAN),
      row("Huge", f64::MAX, 0.0),
    ];

    bar_chart(&rows, "Overflow", 400, 300, &path).unwrap();
    assert!(path.exists());
  }

  #[test]
  fn test_scaling_plot_skips_non_finite_points() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("overflow_scaling.png");
    let series = vec![ScalingSeries {
      method: "DFA".to_string(),
      points: vec![(10.0, 1.0), (f64::INFINITY, 2.0), (100.0, f64::INFINITY), (1000.0, 4.0)],
    }];

    scaling_plot(&series, "Overflow", 400, 300, &path).unwrap();
    let img = image::open(&path).unwrap().to_rgb8();
    assert!(has_color(&img, RED.0));
  }

  #[test]
  fn test_line_ignores_non_finite_endpoints() {
    let mut canvas = Canvas::new(50, 50);
    canvas.line((0.0, 0.0), (f64::INFINITY, 10.0), 2.0, BLACK);
    canvas.line((f64::NAN, 0.0), (10.0, 10.0), 2.0, BLACK);
    assert!(canvas.img.pixels().all(|p| *p == WHITE));
  }

  #[test]
  fn test_rotated_text_stays_visible() {
    let mut canvas = Canvas::new(200, 200);
    canvas.text("DFA", 150.0, 100.0, Align::Right, 25.0, 2.0, BLACK);
    assert!(canvas.img.pixels().any(|p| *p == BLACK));
  }
}
