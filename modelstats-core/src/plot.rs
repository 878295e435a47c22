//! Renderer-independent description of the speed/accuracy plot.

use crate::config::PlotConfig;
use crate::frontier::{PlatformSeries, ScatterPoint};
use crate::platform::{Marker, Platform};

pub const TITLE: &str = "Model Cost vs Accuracy";
pub const X_LABEL: &str = "Runtime (seconds/frame)";
pub const Y_LABEL: &str = "Top 1 accuracy (%)";

/// Accuracy is a percentage; the y axis never goes above this.
pub const MAX_ACCURACY: f64 = 100.0;

/// A closed interval on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// One platform as drawn: its markers, its frontier line, and its style.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub platform: String,
    /// Legend text.
    pub label: String,
    pub color: String,
    pub marker: Marker,
    pub points: Vec<ScatterPoint>,
    /// Frontier line; empty when the platform has no frontier.
    pub line: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    pub series: Vec<PlotSeries>,
    pub grid: bool,
}

impl Plot {
    /// Legend entries, one per displayed platform.
    pub fn legend(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.label.as_str()).collect()
    }
}

/// Build the plot for the platforms in `config.targets`.
///
/// `series` holds every platform; `platforms` supplies their styling and
/// order. Platforms not targeted are left out entirely, including from the
/// legend.
pub fn build_plot(series: &[PlatformSeries], platforms: &[Platform], config: &PlotConfig) -> Plot {
    let displayed: Vec<PlotSeries> = platforms
        .iter()
        .filter(|p| config.targets.iter().any(|t| t == &p.name))
        .filter_map(|p| {
            series.iter().find(|s| s.platform == p.name).map(|s| PlotSeries {
                platform: p.name.clone(),
                label: p.legend.clone(),
                color: p.color.clone(),
                marker: p.marker,
                points: s.scatter.clone(),
                line: s.frontier.iter().map(|f| (f.speed, f.top1)).collect(),
            })
        })
        .collect();

    let (x_range, y_range) = axis_limits(&displayed, config);
    tracing::debug!(
        series = displayed.len(),
        x_max = x_range.max,
        y_min = y_range.min,
        y_max = y_range.max,
        "Built plot"
    );

    Plot {
        title: TITLE.to_string(),
        x_label: X_LABEL.to_string(),
        y_label: Y_LABEL.to_string(),
        x_range,
        y_range,
        series: displayed,
        grid: true,
    }
}

/// Axis limits: x in `[0, min(max_x, cutoff)]`, y in
/// `[max(min_y, accuracy cutoff), min(max_y, 100)]`, over the observed data.
pub fn axis_limits(series: &[PlotSeries], config: &PlotConfig) -> (AxisRange, AxisRange) {
    let observed = series
        .iter()
        .flat_map(|s| s.points.iter().chain(s.line.iter()))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .fold(None, |acc: Option<(f64, f64, f64)>, &(x, y)| match acc {
            None => Some((x, y, y)),
            Some((max_x, min_y, max_y)) => Some((max_x.max(x), min_y.min(y), max_y.max(y))),
        });

    let cutoff = config.max_secs_per_frame;
    let (mut x_max, mut y_min, mut y_max) = match observed {
        Some((max_x, min_y, max_y)) => (
            max_x.min(cutoff),
            min_y.max(config.min_top1_accuracy),
            max_y.min(MAX_ACCURACY),
        ),
        None => (cutoff, config.min_top1_accuracy, MAX_ACCURACY),
    };

    if x_max <= 0.0 {
        x_max = cutoff;
    }
    if y_max <= y_min {
        y_max = (y_min + 0.5).min(MAX_ACCURACY);
        y_min = y_max - 1.0;
    }

    (AxisRange::new(0.0, x_max), AxisRange::new(y_min, y_max))
}
