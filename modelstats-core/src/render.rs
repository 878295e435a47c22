//! Plot rendering.
//!
//! `SvgRenderer` draws a [`Plot`] as a standalone SVG document: framed axes
//! with ticks and grid, markers and frontier lines clipped to the data area,
//! and a legend in the top-right corner.

use crate::config::PlotFormat;
use crate::error::{ModelStatsError, Result};
use crate::platform::Marker;
use crate::plot::{AxisRange, Plot};
use crate::report::atomic_write;
use std::fmt::Write;
use std::path::Path;

/// Turns a plot into the bytes of an image file.
pub trait PlotRenderer {
    fn format(&self) -> PlotFormat;

    fn render(&self, plot: &Plot) -> Result<Vec<u8>>;
}

/// Renderer for `format`.
pub fn renderer_for(format: PlotFormat) -> Box<dyn PlotRenderer> {
    match format {
        PlotFormat::Svg => Box::new(SvgRenderer::default()),
    }
}

/// Render `plot` and write it to `path`.
pub fn save_plot(renderer: &dyn PlotRenderer, plot: &Plot, path: &Path) -> Result<()> {
    let bytes = renderer.render(plot)?;
    atomic_write(path, &bytes).map_err(|e| ModelStatsError::write(path, e))?;
    tracing::info!(
        path = %path.display(),
        format = %renderer.format(),
        bytes = bytes.len(),
        "Saved plot"
    );
    Ok(())
}

/// SVG output. Sizes are in pixels.
#[derive(Debug, Clone, Copy)]
pub struct SvgRenderer {
    pub width: f64,
    pub height: f64,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 25.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;
const MARKER_SIZE: f64 = 4.5;
const TARGET_TICKS: f64 = 6.0;

/// Maps data coordinates onto the pixel area of the plot.
struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    x: AxisRange,
    y: AxisRange,
}

impl Frame {
    fn px(&self, x: f64) -> f64 {
        self.left + (x - self.x.min) / self.x.span() * self.width
    }

    fn py(&self, y: f64) -> f64 {
        self.top + self.height - (y - self.y.min) / self.y.span() * self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

impl PlotRenderer for SvgRenderer {
    fn format(&self) -> PlotFormat {
        PlotFormat::Svg
    }

    fn render(&self, plot: &Plot) -> Result<Vec<u8>> {
        let mut svg = String::new();
        self.write_svg(plot, &mut svg)?;
        Ok(svg.into_bytes())
    }
}

impl SvgRenderer {
    fn write_svg(&self, plot: &Plot, svg: &mut String) -> std::fmt::Result {
        let frame = Frame {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: self.width - MARGIN_LEFT - MARGIN_RIGHT,
            height: self.height - MARGIN_TOP - MARGIN_BOTTOM,
            x: plot.x_range,
            y: plot.y_range,
        };

        writeln!(svg, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
        writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"sans-serif\">",
            w = self.width,
            h = self.height
        )?;
        writeln!(
            svg,
            "  <defs><clipPath id=\"data-area\"><rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\"/></clipPath></defs>",
            frame.left, frame.top, frame.width, frame.height
        )?;
        writeln!(svg, "  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>")?;

        self.write_axes(plot, &frame, svg)?;

        writeln!(svg, "  <g clip-path=\"url(#data-area)\">")?;
        for series in &plot.series {
            let color = escape(&series.color);
            for &(x, y) in &series.points {
                if x.is_finite() && y.is_finite() {
                    write_marker(svg, series.marker, frame.px(x), frame.py(y), &color)?;
                }
            }
        }
        // frontier lines after the scatter so they stay on top
        for series in &plot.series {
            if series.line.is_empty() {
                continue;
            }
            let points: Vec<String> = series
                .line
                .iter()
                .map(|&(x, y)| format!("{:.2},{:.2}", frame.px(x), frame.py(y)))
                .collect();
            writeln!(
                svg,
                "    <polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\"/>",
                points.join(" "),
                escape(&series.color)
            )?;
        }
        writeln!(svg, "  </g>")?;

        self.write_legend(plot, &frame, svg)?;

        writeln!(svg, "</svg>")
    }

    fn write_axes(&self, plot: &Plot, frame: &Frame, svg: &mut String) -> std::fmt::Result {
        writeln!(
            svg,
            "  <text x=\"{:.1}\" y=\"30\" text-anchor=\"middle\" font-size=\"16\">{}</text>",
            self.width / 2.0,
            escape(&plot.title)
        )?;

        for tick in ticks(frame.x) {
            let x = frame.px(tick);
            if plot.grid {
                writeln!(
                    svg,
                    "  <line x1=\"{x:.1}\" y1=\"{:.1}\" x2=\"{x:.1}\" y2=\"{:.1}\" stroke=\"#dddddd\"/>",
                    frame.top,
                    frame.bottom()
                )?;
            }
            writeln!(
                svg,
                "  <text x=\"{x:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"11\">{}</text>",
                frame.bottom() + 16.0,
                format_tick(tick, frame.x)
            )?;
        }
        for tick in ticks(frame.y) {
            let y = frame.py(tick);
            if plot.grid {
                writeln!(
                    svg,
                    "  <line x1=\"{:.1}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" stroke=\"#dddddd\"/>",
                    frame.left,
                    frame.right()
                )?;
            }
            writeln!(
                svg,
                "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"11\">{}</text>",
                frame.left - 6.0,
                y + 4.0,
                format_tick(tick, frame.y)
            )?;
        }

        writeln!(
            svg,
            "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"none\" stroke=\"black\"/>",
            frame.left, frame.top, frame.width, frame.height
        )?;
        writeln!(
            svg,
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"13\">{}</text>",
            frame.left + frame.width / 2.0,
            self.height - 15.0,
            escape(&plot.x_label)
        )?;
        let cy = frame.top + frame.height / 2.0;
        writeln!(
            svg,
            "  <text x=\"20\" y=\"{cy:.1}\" text-anchor=\"middle\" font-size=\"13\" transform=\"rotate(-90 20 {cy:.1})\">{}</text>",
            escape(&plot.y_label)
        )
    }

    fn write_legend(&self, plot: &Plot, frame: &Frame, svg: &mut String) -> std::fmt::Result {
        if plot.series.is_empty() {
            return Ok(());
        }
        let row = 18.0;
        let longest = plot
            .series
            .iter()
            .map(|s| s.label.chars().count())
            .max()
            .unwrap_or(0) as f64;
        let width = 44.0 + longest * 6.5;
        let height = 10.0 + row * plot.series.len() as f64;
        let left = frame.right() - width - 10.0;
        let top = frame.top + 10.0;

        writeln!(
            svg,
            "  <rect x=\"{left:.1}\" y=\"{top:.1}\" width=\"{width:.1}\" height=\"{height:.1}\" fill=\"white\" fill-opacity=\"0.6\" stroke=\"#999999\"/>"
        )?;
        for (i, series) in plot.series.iter().enumerate() {
            let y = top + 14.0 + row * i as f64;
            let color = escape(&series.color);
            writeln!(
                svg,
                "  <line x1=\"{:.1}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" stroke=\"{color}\" stroke-width=\"1.5\"/>",
                left + 8.0,
                left + 30.0
            )?;
            write_marker(svg, series.marker, left + 19.0, y, &color)?;
            writeln!(
                svg,
                "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\">{}</text>",
                left + 36.0,
                y + 4.0,
                escape(&series.label)
            )?;
        }
        Ok(())
    }
}

fn write_marker(svg: &mut String, marker: Marker, x: f64, y: f64, color: &str) -> std::fmt::Result {
    let s = MARKER_SIZE;
    match marker {
        Marker::Circle => writeln!(
            svg,
            "    <circle cx=\"{x:.2}\" cy=\"{y:.2}\" r=\"{s}\" fill=\"{color}\"/>"
        ),
        Marker::Square => writeln!(
            svg,
            "    <rect x=\"{:.2}\" y=\"{:.2}\" width=\"{}\" height=\"{}\" fill=\"{color}\"/>",
            x - s,
            y - s,
            2.0 * s,
            2.0 * s
        ),
        Marker::Triangle => writeln!(
            svg,
            "    <polygon points=\"{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}\" fill=\"{color}\"/>",
            x,
            y - s,
            x - s,
            y + s,
            x + s,
            y + s
        ),
        Marker::Diamond => writeln!(
            svg,
            "    <polygon points=\"{:.2},{:.2} {:.2},{:.2} {:.2},{:.2} {:.2},{:.2}\" fill=\"{color}\"/>",
            x,
            y - s,
            x + s,
            y,
            x,
            y + s,
            x - s,
            y
        ),
    }
}

/// Round tick step (1, 2 or 5 times a power of ten) for `range`.
fn tick_step(range: AxisRange) -> f64 {
    let raw = range.span() / TARGET_TICKS;
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn ticks(range: AxisRange) -> Vec<f64> {
    let step = tick_step(range);
    let first = (range.min / step).ceil() as i64;
    let last = (range.max / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

fn format_tick(value: f64, range: AxisRange) -> String {
    let step = tick_step(range);
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    format!("{value:.decimals$}")
}

/// Escape text for use in SVG content and attribute values.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::PlotSeries;
    use tempfile::TempDir;

    fn plot() -> Plot {
        Plot {
            title: "Model Cost vs Accuracy".into(),
            x_label: "Runtime (seconds/frame)".into(),
            y_label: "Top 1 accuracy (%)".into(),
            x_range: AxisRange::new(0.0, 1.5),
            y_range: AxisRange::new(20.0, 100.0),
            series: vec![
                PlotSeries {
                    platform: "pi3".into(),
                    label: "Raspberry Pi3/Raspbian".into(),
                    color: "red".into(),
                    marker: Marker::Circle,
                    points: vec![(0.3, 60.0), (0.5, 70.0)],
                    line: vec![(0.3, 60.0), (0.5, 70.0)],
                },
                PlotSeries {
                    platform: "aarch64".into(),
                    label: "R&D <board>".into(),
                    color: "green".into(),
                    marker: Marker::Triangle,
                    points: vec![(0.2, 50.0)],
                    line: vec![],
                },
            ],
            grid: true,
        }
    }

    fn render(plot: &Plot) -> String {
        String::from_utf8(SvgRenderer::default().render(plot).unwrap()).unwrap()
    }

    #[test]
    fn test_svg_document_structure() {
        let svg = render(&plot());
        assert!(svg.starts_with("<?xml"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("Model Cost vs Accuracy"));
        assert!(svg.contains("Runtime (seconds/frame)"));
        assert!(svg.contains("Top 1 accuracy (%)"));
        assert!(svg.contains("clip-path=\"url(#data-area)\""));
    }

    #[test]
    fn test_svg_draws_markers_and_lines() {
        let svg = render(&plot());
        assert_eq!(svg.matches("<polyline").count(), 1);
        // two scatter circles plus one legend circle
        assert_eq!(svg.matches("<circle").count(), 3);
        // one scatter triangle plus one legend triangle
        assert_eq!(svg.matches("<polygon").count(), 2);
    }

    #[test]
    fn test_svg_escapes_legend_text() {
        let svg = render(&plot());
        assert!(svg.contains("R&amp;D &lt;board&gt;"));
        assert!(!svg.contains("<board>"));
    }

    #[test]
    fn test_svg_no_legend_without_series() {
        let mut empty = plot();
        empty.series.clear();
        let svg = render(&empty);
        assert!(!svg.contains("fill-opacity=\"0.6\""));
    }

    #[test]
    fn test_ticks() {
        assert_eq!(tick_step(AxisRange::new(0.0, 1.5)), 0.5);
        assert_eq!(ticks(AxisRange::new(20.0, 100.0)), vec![20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(format_tick(0.5, AxisRange::new(0.0, 1.5)), "0.5");
        assert_eq!(format_tick(40.0, AxisRange::new(20.0, 100.0)), "40");
    }

    #[test]
    fn test_save_plot_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plots").join("model_speed_accuracy.svg");
        let renderer = renderer_for(PlotFormat::Svg);
        save_plot(renderer.as_ref(), &plot(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
    }
}
