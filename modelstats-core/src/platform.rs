//! Target hardware platforms and how each one is drawn.

use crate::error::{ModelStatsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker shape used for a platform's scatter points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    Circle,
    Square,
    Triangle,
    Diamond,
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Circle => write!(f, "circle"),
            Marker::Square => write!(f, "square"),
            Marker::Triangle => write!(f, "triangle"),
            Marker::Diamond => write!(f, "diamond"),
        }
    }
}

/// A target platform models are timed on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Identifier used in timing data and on the command line (e.g. `pi3`).
    pub name: String,
    /// Human-readable name shown in the plot legend.
    pub legend: String,
    /// Any SVG color (`red`, `#1f77b4`, ...).
    pub color: String,
    pub marker: Marker,
}

impl Platform {
    pub fn new(name: &str, legend: &str, color: &str, marker: Marker) -> Self {
        Self {
            name: name.to_string(),
            legend: legend.to_string(),
            color: color.to_string(),
            marker,
        }
    }
}

/// The platforms known out of the box, in report order.
pub fn default_platforms() -> Vec<Platform> {
    vec![
        Platform::new("pi3", "Raspberry Pi3/Raspbian", "red", Marker::Circle),
        Platform::new("pi3_64", "Raspberry Pi3/SUSE", "blue", Marker::Square),
        Platform::new("aarch64", "Dragonboard D410c", "green", Marker::Triangle),
    ]
}

/// Names of `platforms`, in order.
pub fn platform_names(platforms: &[Platform]) -> Vec<String> {
    platforms.iter().map(|p| p.name.clone()).collect()
}

/// Check that every display target names a known platform.
pub fn validate_targets(platforms: &[Platform], targets: &[String]) -> Result<()> {
    for target in targets {
        if !platforms.iter().any(|p| &p.name == target) {
            return Err(ModelStatsError::UnknownPlatform {
                name: target.clone(),
                valid: platform_names(platforms).join(", "),
            });
        }
    }
    Ok(())
}
