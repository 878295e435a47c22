//! # modelstats-core — speed/accuracy frontiers for model zoos
//!
//! Scans a folder of models, reads each model's top-N accuracy and its
//! seconds-per-frame on every target platform, and computes per-platform
//! Pareto frontiers (best accuracy for a given speed). The frontiers are
//! written as a JSON report and drawn as a scatter/line plot.

pub mod config;
pub mod discovery;
pub mod error;
pub mod frontier;
pub mod pipeline;
pub mod platform;
pub mod plot;
pub mod render;
pub mod report;
pub mod retriever;
pub mod stats;

// Re-exports
pub use config::{load_config, ModelStatsConfig, PlotFormat};
pub use error::{EmptyFrontierError, ModelInfoError, ModelStatsError, RetrievalError};
pub use frontier::{compute_frontiers, pareto_frontier, FrontierAnalysis, FrontierPoint, PlatformSeries};
pub use pipeline::{analyze, run, Analysis};
pub use platform::{Marker, Platform};
pub use plot::{build_plot, Plot};
pub use render::{renderer_for, PlotRenderer, SvgRenderer};
pub use report::{FrontierReport, PlatformFrontier};
pub use retriever::{FsModelInfoSource, ModelInfoSource};
pub use stats::{Accuracy, ModelStat};
