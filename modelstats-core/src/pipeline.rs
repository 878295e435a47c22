//! End-to-end run: discovery -> retrieval -> frontiers -> report -> plot.
//!
//! Each stage takes the previous stage's output by reference and returns a
//! new value; nothing is accumulated in shared state.

use crate::config::ModelStatsConfig;
use crate::discovery::{discover_models, ensure_models_root};
use crate::error::Result;
use crate::frontier::{compute_frontiers, FrontierAnalysis};
use crate::platform::platform_names;
use crate::plot::{build_plot, Plot};
use crate::render::{save_plot, PlotRenderer};
use crate::retriever::{collect_stats, CollectedStats, ModelInfoSource};
use std::path::Path;

/// Everything a run produced.
#[derive(Debug)]
pub struct Analysis {
    pub models: Vec<String>,
    pub collected: CollectedStats,
    pub frontiers: FrontierAnalysis,
    pub plot: Plot,
}

/// Run every stage except writing outputs.
///
/// Configuration and the models root are checked before any model is read.
pub fn analyze(
    models_root: &Path,
    config: &ModelStatsConfig,
    source: &dyn ModelInfoSource,
) -> Result<Analysis> {
    config.validate()?;
    ensure_models_root(models_root)?;

    let models = discover_models(models_root)?;
    let platforms = platform_names(&config.platforms);
    let collected = collect_stats(models_root, &models, source, &platforms);
    let frontiers = compute_frontiers(
        &collected.stats,
        &config.platforms,
        config.plot.max_secs_per_frame,
    );
    let plot = build_plot(&frontiers.series, &config.platforms, &config.plot);

    Ok(Analysis {
        models,
        collected,
        frontiers,
        plot,
    })
}

/// Analyze `models_root`, then write the frontier report and the plot to the
/// paths in `config.output`.
pub fn run(
    models_root: &Path,
    config: &ModelStatsConfig,
    source: &dyn ModelInfoSource,
    renderer: &dyn PlotRenderer,
) -> Result<Analysis> {
    let analysis = analyze(models_root, config, source)?;
    analysis.frontiers.report.save(&config.output.stats)?;
    save_plot(renderer, &analysis.plot, &config.output.figure)?;
    Ok(analysis)
}
