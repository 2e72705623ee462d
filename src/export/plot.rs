//! Scatter plot of per-batch D/R ratios, written as SVG.

use super::{ExportError, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 480.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 55.0;

const Y_MIN: f64 = 0.0;
const Y_MAX: f64 = 2.0;
const Y_TICK: f64 = 0.25;

/// Maps data coordinates into the plot frame.
struct Frame {
    x_max: f64,
}

impl Frame {
    fn new(points: usize) -> Self {
        Frame {
            x_max: points.saturating_sub(1).max(1) as f64,
        }
    }

    fn left(&self) -> f64 {
        MARGIN_LEFT
    }

    fn right(&self) -> f64 {
        WIDTH - MARGIN_RIGHT
    }

    fn top(&self) -> f64 {
        MARGIN_TOP
    }

    fn bottom(&self) -> f64 {
        HEIGHT - MARGIN_BOTTOM
    }

    fn x(&self, batch: f64) -> f64 {
        self.left() + (self.right() - self.left()) * batch / self.x_max
    }

    fn y(&self, ratio: f64) -> f64 {
        let clamped = ratio.max(Y_MIN).min(Y_MAX);
        self.bottom() - (self.bottom() - self.top()) * (clamped - Y_MIN) / (Y_MAX - Y_MIN)
    }
}

/// Write the plot for one state to `path`.
pub fn save_ratio_plot(path: &Path, title: &str, ratios: &[f64]) -> Result<()> {
    let io_error = |source| ExportError::Io {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    write_ratio_plot(&mut writer, title, ratios).map_err(io_error)?;
    writer.flush().map_err(io_error)
}

pub fn write_ratio_plot<W: Write>(out: &mut W, title: &str, ratios: &[f64]) -> io::Result<()> {
    let frame = Frame::new(ratios.len());

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = WIDTH,
        h = HEIGHT
    )?;
    writeln!(
        out,
        "<style>.grid{{stroke:#b0b0b0;stroke-width:0.8}}.axis{{stroke:#000;fill:none}}\
         .batch{{fill:#1f77b4}}.clipped{{fill:#d62728}}text{{font-family:sans-serif;font-size:12px}}</style>"
    )?;
    writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#)?;

    write_grid(out, &frame)?;

    writeln!(
        out,
        r#"<rect class="axis" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/>"#,
        frame.left(),
        frame.top(),
        frame.right() - frame.left(),
        frame.bottom() - frame.top()
    )?;

    for (batch, ratio) in ratios.iter().enumerate() {
        let class = if (Y_MIN..=Y_MAX).contains(ratio) {
            "batch"
        } else {
            "batch clipped"
        };
        writeln!(
            out,
            r#"<circle class="{}" cx="{:.2}" cy="{:.2}" r="3"/>"#,
            class,
            frame.x(batch as f64),
            frame.y(*ratio)
        )?;
    }

    writeln!(
        out,
        r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="14">{}</text>"#,
        WIDTH / 2.0,
        MARGIN_TOP / 2.0 + 5.0,
        escape(title)
    )?;
    writeln!(
        out,
        r#"<text x="{:.2}" y="{:.2}" text-anchor="middle">Batch Number</text>"#,
        (frame.left() + frame.right()) / 2.0,
        HEIGHT - 12.0
    )?;
    writeln!(
        out,
        r#"<text x="18" y="{y:.2}" text-anchor="middle" transform="rotate(-90 18 {y:.2})">D/R Vote Ratio of Batch</text>"#,
        y = (frame.top() + frame.bottom()) / 2.0
    )?;

    writeln!(out, "</svg>")
}

fn write_grid<W: Write>(out: &mut W, frame: &Frame) -> io::Result<()> {
    let y_ticks = ((Y_MAX - Y_MIN) / Y_TICK).round() as usize;
    for i in 0..=y_ticks {
        let value = Y_MIN + i as f64 * Y_TICK;
        let y = frame.y(value);
        writeln!(
            out,
            r#"<line class="grid" x1="{:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}"/>"#,
            frame.left(),
            frame.right(),
            y = y
        )?;
        writeln!(
            out,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="end">{:.2}</text>"#,
            frame.left() - 6.0,
            y + 4.0,
            value
        )?;
    }

    let step = tick_step(frame.x_max);
    let mut value = 0.0;
    while value <= frame.x_max {
        let x = frame.x(value);
        writeln!(
            out,
            r#"<line class="grid" x1="{x:.2}" y1="{:.2}" x2="{x:.2}" y2="{:.2}"/>"#,
            frame.top(),
            frame.bottom(),
            x = x
        )?;
        writeln!(
            out,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
            x,
            frame.bottom() + 16.0,
            value
        )?;
        value += step;
    }

    Ok(())
}

/// A 1/2/5 x 10^k step giving roughly eight ticks over `0..=span`.
fn tick_step(span: f64) -> f64 {
    let raw = (span / 8.0).max(1.0);
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(title: &str, ratios: &[f64]) -> String {
        let mut out = Vec::new();
        write_ratio_plot(&mut out, title, ratios).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn one_marker_per_batch() {
        let svg = render("ohio", &[0.0, 0.6, 1.2, 0.9]);
        assert_eq!(svg.matches("<circle").count(), 4);
        assert!(svg.contains(">ohio</text>"));
        assert!(svg.contains("Batch Number"));
        assert!(svg.contains("D/R Vote Ratio of Batch"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn out_of_range_ratios_are_clamped_to_frame() {
        let frame = Frame::new(3);
        assert_eq!(frame.y(5.0), frame.top());
        assert_eq!(frame.y(-1.0), frame.bottom());

        let svg = render("texas", &[0.5, 5.0, -1.0]);
        assert_eq!(svg.matches("batch clipped").count(), 2);
    }

    #[test]
    fn single_batch_sits_on_left_edge() {
        let frame = Frame::new(1);
        assert_eq!(frame.x(0.0), frame.left());
        assert_eq!(render("utah", &[0.0]).matches("<circle").count(), 1);
    }

    #[test]
    fn tick_steps_are_round_numbers() {
        assert_eq!(tick_step(1.0), 1.0);
        assert_eq!(tick_step(20.0), 5.0);
        assert_eq!(tick_step(150.0), 20.0);
        assert_eq!(tick_step(700.0), 100.0);
    }

    #[test]
    fn titles_are_escaped() {
        assert!(render("a<b", &[]).contains("a&lt;b"));
    }
}
