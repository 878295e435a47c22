//! Pareto frontiers of accuracy vs. speed.
//!
//! A frontier is the staircase of models giving the best top-1 accuracy
//! achievable at or below each speed: scanning models from fastest to
//! slowest, a model is kept when its top-1 accuracy is at least that of the
//! last model kept.

use crate::error::EmptyFrontierError;
use crate::platform::Platform;
use crate::report::{FrontierReport, PlatformFrontier};
use crate::stats::ModelStat;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One model placed on the speed/accuracy plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FrontierEntry", into = "FrontierEntry")]
pub struct FrontierPoint {
    /// Seconds per frame; lower is faster.
    pub speed: f64,
    pub top1: f64,
    pub top5: f64,
    pub model_name: String,
}

/// Report encoding of a point: `[model_name, speed, top1, top5]`.
#[derive(Serialize, Deserialize)]
struct FrontierEntry(String, f64, f64, f64);

impl From<FrontierEntry> for FrontierPoint {
    fn from(FrontierEntry(model_name, speed, top1, top5): FrontierEntry) -> Self {
        Self {
            speed,
            top1,
            top5,
            model_name,
        }
    }
}

impl From<FrontierPoint> for FrontierEntry {
    fn from(point: FrontierPoint) -> Self {
        FrontierEntry(point.model_name, point.speed, point.top1, point.top5)
    }
}

impl FrontierPoint {
    pub fn new(speed: f64, top1: f64, top5: f64, model_name: &str) -> Self {
        Self {
            speed,
            top1,
            top5,
            model_name: model_name.to_string(),
        }
    }

    /// Ascending by speed, ties broken by (top1, top5, model_name).
    fn sort_key_cmp(&self, other: &Self) -> Ordering {
        self.speed
            .total_cmp(&other.speed)
            .then_with(|| self.top1.total_cmp(&other.top1))
            .then_with(|| self.top5.total_cmp(&other.top5))
            .then_with(|| self.model_name.cmp(&other.model_name))
    }
}

/// Compute the Pareto frontier of `candidates`.
///
/// Candidates at or above `max_secs_per_frame` are excluded before the scan.
/// Equal-accuracy points are kept, so the result is non-decreasing in top-1
/// and ascending in speed. Fails when no candidate is below the cutoff.
pub fn pareto_frontier(
    candidates: &[FrontierPoint],
    max_secs_per_frame: f64,
) -> Result<Vec<FrontierPoint>, EmptyFrontierError> {
    let mut values: Vec<FrontierPoint> = candidates
        .iter()
        .filter(|p| p.speed < max_secs_per_frame)
        .cloned()
        .collect();
    values.sort_by(FrontierPoint::sort_key_cmp);

    let mut values = values.into_iter();
    let first = values.next().ok_or(EmptyFrontierError { max_secs_per_frame })?;
    let mut best_top1 = first.top1;
    let mut frontier = vec![first];
    for point in values {
        if point.top1 >= best_top1 {
            best_top1 = point.top1;
            frontier.push(point);
        }
    }
    Ok(frontier)
}

/// A scatter point: (seconds per frame, top-1 accuracy).
pub type ScatterPoint = (f64, f64);

/// Everything needed to draw one platform.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformSeries {
    pub platform: String,
    /// Every model timed on the platform, in statistics order, uncut.
    pub scatter: Vec<ScatterPoint>,
    /// The frontier line; empty when no model beats the cutoff.
    pub frontier: Vec<FrontierPoint>,
}

/// Frontiers for every platform, as report and as plot series.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontierAnalysis {
    pub report: FrontierReport,
    pub series: Vec<PlatformSeries>,
}

/// Models in `stats` that were timed on `platform`, as frontier candidates.
pub fn platform_candidates(stats: &[ModelStat], platform: &str) -> Vec<FrontierPoint> {
    stats
        .iter()
        .filter_map(|stat| {
            stat.speed_on(platform).map(|speed| {
                FrontierPoint::new(
                    speed,
                    stat.accuracy.top1,
                    stat.accuracy.top5,
                    &stat.model_name,
                )
            })
        })
        .collect()
}

/// Compute the series and frontier of a single platform.
///
/// An empty frontier is logged and yields an empty line rather than an error.
pub fn compute_platform(
    stats: &[ModelStat],
    platform: &str,
    max_secs_per_frame: f64,
) -> PlatformSeries {
    let candidates = platform_candidates(stats, platform);
    let scatter = candidates.iter().map(|p| (p.speed, p.top1)).collect();
    let frontier = match pareto_frontier(&candidates, max_secs_per_frame) {
        Ok(frontier) => frontier,
        Err(e) => {
            tracing::warn!(
                platform = %platform,
                timed_models = candidates.len(),
                error = %e,
                "Empty frontier"
            );
            Vec::new()
        }
    };
    tracing::debug!(platform = %platform, points = frontier.len(), "Computed frontier");

    PlatformSeries {
        platform: platform.to_string(),
        scatter,
        frontier,
    }
}

/// Compute frontiers for every platform, in the order given.
///
/// This always covers all `platforms`; choosing which ones to draw happens
/// later when the plot is built.
pub fn compute_frontiers(
    stats: &[ModelStat],
    platforms: &[Platform],
    max_secs_per_frame: f64,
) -> FrontierAnalysis {
    let series: Vec<PlatformSeries> = platforms
        .iter()
        .map(|p| compute_platform(stats, &p.name, max_secs_per_frame))
        .collect();

    let report = FrontierReport::new(
        series
            .iter()
            .map(|s| PlatformFrontier {
                platform: s.platform.clone(),
                frontier_models: s.frontier.clone(),
            })
            .collect(),
    );

    FrontierAnalysis { report, series }
}
