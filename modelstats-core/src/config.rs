//! Configuration management for modelstats.
//!
//! Uses `figment` for layered configuration: defaults -> user config file ->
//! workspace config file -> explicit config file -> environment. CLI flags
//! are applied on top by the binary.

use crate::error::{ModelStatsError, Result};
use crate::platform::{default_platforms, validate_targets, Platform};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Name of the per-workspace config directory.
pub const WORKSPACE_CONFIG_DIR: &str = ".modelstats";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStatsConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub plot: PlotConfig,
    /// Known platforms, in report order.
    #[serde(default = "default_platforms")]
    pub platforms: Vec<Platform>,
}

impl Default for ModelStatsConfig {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            plot: PlotConfig::default(),
            platforms: default_platforms(),
        }
    }
}

/// Image formats the plot can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotFormat {
    Svg,
}

impl fmt::Display for PlotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotFormat::Svg => write!(f, "svg"),
        }
    }
}

impl FromStr for PlotFormat {
    type Err = ModelStatsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(PlotFormat::Svg),
            _ => Err(ModelStatsError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Where results are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Path of the plot image.
    #[serde(default = "default_figure")]
    pub figure: PathBuf,
    #[serde(default = "default_format")]
    pub format: PlotFormat,
    /// Path of the frontier JSON report.
    #[serde(default = "default_stats")]
    pub stats: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            figure: default_figure(),
            format: default_format(),
            stats: default_stats(),
        }
    }
}

fn default_figure() -> PathBuf {
    PathBuf::from("model_speed_accuracy.svg")
}

fn default_format() -> PlotFormat {
    PlotFormat::Svg
}

fn default_stats() -> PathBuf {
    PathBuf::from("frontier_models.json")
}

/// Plot cutoffs and display selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Models at or above this speed are left out of frontiers and the x axis.
    #[serde(default = "default_max_secs_per_frame")]
    pub max_secs_per_frame: f64,
    /// Lower clamp for the y axis, in percent.
    #[serde(default = "default_min_top1_accuracy")]
    pub min_top1_accuracy: f64,
    /// Platforms drawn on the plot. Reports always cover every platform.
    #[serde(default = "default_targets")]
    pub targets: Vec<String>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            max_secs_per_frame: default_max_secs_per_frame(),
            min_top1_accuracy: default_min_top1_accuracy(),
            targets: default_targets(),
        }
    }
}

fn default_max_secs_per_frame() -> f64 {
    1.5
}

fn default_min_top1_accuracy() -> f64 {
    20.0
}

fn default_targets() -> Vec<String> {
    vec!["pi3".to_string()]
}

impl ModelStatsConfig {
    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let max_x = self.plot.max_secs_per_frame;
        if !max_x.is_finite() || max_x <= 0.0 {
            return Err(ModelStatsError::config(format!(
                "plot.max_secs_per_frame must be a positive number, got {max_x}"
            )));
        }
        let min_y = self.plot.min_top1_accuracy;
        if !min_y.is_finite() || min_y >= 100.0 {
            return Err(ModelStatsError::config(format!(
                "plot.min_top1_accuracy must be below 100, got {min_y}"
            )));
        }
        if self.platforms.is_empty() {
            return Err(ModelStatsError::config("at least one platform is required"));
        }
        for (i, platform) in self.platforms.iter().enumerate() {
            if self.platforms[..i].iter().any(|p| p.name == platform.name) {
                return Err(ModelStatsError::config(format!(
                    "platform '{}' is listed twice",
                    platform.name
                )));
            }
        }
        validate_targets(&self.platforms, &self.plot.targets)
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("dev", "modelstats", "modelstats")
}

/// Path of the user-level config file, if a home directory is known.
pub fn user_config_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("config.toml"))
}

/// Path of the workspace-level config file.
pub fn workspace_config_path(workspace: &Path) -> PathBuf {
    workspace.join(WORKSPACE_CONFIG_DIR).join("config.toml")
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with `MODELSTATS_`, `__` nests)
/// 2. Explicit config file
/// 3. Workspace-local config (`.modelstats/config.toml`)
/// 4. User config (`~/.config/modelstats/config.toml`)
/// 5. Built-in defaults
///
/// An explicit config file that does not exist is an error; the implicit
/// locations are skipped when absent.
pub fn load_config(
    workspace: Option<&Path>,
    config_file: Option<&Path>,
) -> Result<ModelStatsConfig> {
    let mut figment = Figment::from(Serialized::defaults(ModelStatsConfig::default()));

    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    if let Some(ws) = workspace {
        let ws_config = workspace_config_path(ws);
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    if let Some(file) = config_file {
        if !file.is_file() {
            return Err(ModelStatsError::config(format!(
                "config file {} does not exist",
                file.display()
            )));
        }
        figment = figment.merge(Toml::file(file));
    }

    // MODELSTATS_PLOT__MAX_SECS_PER_FRAME, MODELSTATS_OUTPUT__STATS, ...
    figment = figment.merge(Env::prefixed("MODELSTATS_").split("__"));

    let config: ModelStatsConfig = figment.extract().map_err(Box::new)?;
    tracing::debug!(
        platforms = config.platforms.len(),
        targets = ?config.plot.targets,
        "Configuration loaded"
    );
    Ok(config)
}
