//! Model metadata retrieval.
//!
//! `ModelInfoSource` is the seam between the frontier logic and however a
//! model zoo stores its measurements. `FsModelInfoSource` reads the JSON
//! layout below:
//!
//! ```text
//! <model>/accuracy.json            {"top1": 70.2, "top5": 89.6}
//! <model>/timing/<platform>.json   {"secs_per_frame": 0.42}
//! ```

use crate::error::{ModelInfoError, RetrievalError};
use crate::stats::{Accuracy, ModelStat};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const ACCURACY_FILE: &str = "accuracy.json";
pub const TIMING_DIR: &str = "timing";

/// Supplies accuracy and speed measurements for a model folder.
pub trait ModelInfoSource {
    /// Top-1 and top-5 accuracy of the model, in percent.
    fn accuracies(&self, model_dir: &Path, model: &str) -> Result<Accuracy, ModelInfoError>;

    /// Seconds per frame for each of `platforms` the model was timed on.
    /// Platforms without data are absent from the result.
    fn seconds_per_frame(
        &self,
        model_dir: &Path,
        model: &str,
        platforms: &[String],
    ) -> Result<BTreeMap<String, f64>, ModelInfoError>;
}

/// Reads model metadata from JSON files inside each model folder.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsModelInfoSource;

#[derive(Deserialize)]
struct TimingFile {
    secs_per_frame: f64,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ModelInfoError> {
    let content = std::fs::read_to_string(path).map_err(|source| ModelInfoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ModelInfoError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn check_range(
    path: &Path,
    field: &'static str,
    value: f64,
    max: f64,
) -> Result<f64, ModelInfoError> {
    if value.is_finite() && (0.0..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ModelInfoError::InvalidValue {
            path: path.to_path_buf(),
            field,
            value,
        })
    }
}

impl ModelInfoSource for FsModelInfoSource {
    fn accuracies(&self, model_dir: &Path, _model: &str) -> Result<Accuracy, ModelInfoError> {
        let path = model_dir.join(ACCURACY_FILE);
        let accuracy: Accuracy = read_json(&path)?;
        Ok(Accuracy {
            top1: check_range(&path, "top1", accuracy.top1, 100.0)?,
            top5: check_range(&path, "top5", accuracy.top5, 100.0)?,
        })
    }

    fn seconds_per_frame(
        &self,
        model_dir: &Path,
        _model: &str,
        platforms: &[String],
    ) -> Result<BTreeMap<String, f64>, ModelInfoError> {
        let mut speeds = BTreeMap::new();
        for platform in platforms {
            let path = timing_path(model_dir, platform);
            if !path.exists() {
                continue;
            }
            let timing: TimingFile = read_json(&path)?;
            let secs = check_range(&path, "secs_per_frame", timing.secs_per_frame, f64::MAX)?;
            speeds.insert(platform.clone(), secs);
        }
        Ok(speeds)
    }
}

/// Location of a model's timing file for `platform`.
pub fn timing_path(model_dir: &Path, platform: &str) -> PathBuf {
    model_dir.join(TIMING_DIR).join(format!("{platform}.json"))
}

/// Statistics for every model that could be read, plus the ones that could not.
#[derive(Debug, Default)]
pub struct CollectedStats {
    pub stats: Vec<ModelStat>,
    pub failures: Vec<RetrievalError>,
}

/// Collect statistics for `models` under `root`.
///
/// A model that fails is logged, recorded in `failures` and left out of
/// `stats`; the remaining models are still processed.
pub fn collect_stats(
    root: &Path,
    models: &[String],
    source: &dyn ModelInfoSource,
    platforms: &[String],
) -> CollectedStats {
    let mut collected = CollectedStats::default();

    for model in models {
        let model_dir = root.join(model);
        let result = source.accuracies(&model_dir, model).and_then(|accuracy| {
            source
                .seconds_per_frame(&model_dir, model, platforms)
                .map(|speeds| ModelStat::new(model, accuracy, speeds))
        });
        match result {
            Ok(stat) => {
                tracing::debug!(
                    model = %model,
                    top1 = stat.accuracy.top1,
                    platforms = stat.secs_per_frame.len(),
                    "Collected model stats"
                );
                collected.stats.push(stat);
            }
            Err(source) => {
                let err = RetrievalError {
                    model: model.clone(),
                    source,
                };
                tracing::warn!(model = %model, error = %err.source, "Could not collect stats, skipping");
                collected.failures.push(err);
            }
        }
    }

    tracing::info!(
        collected = collected.stats.len(),
        skipped = collected.failures.len(),
        "Finished collecting model stats"
    );
    collected
}
