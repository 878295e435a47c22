//! Per-model statistics gathered from a model folder.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-N classification accuracy, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Accuracy {
    pub top1: f64,
    pub top5: f64,
}

/// Accuracy and per-platform speed of one model.
///
/// A platform is absent from `secs_per_frame` when the model was never timed
/// on it (e.g. too large to link for that target).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelStat {
    pub model_name: String,
    pub accuracy: Accuracy,
    pub secs_per_frame: BTreeMap<String, f64>,
}

impl ModelStat {
    pub fn new(model_name: &str, accuracy: Accuracy, secs_per_frame: BTreeMap<String, f64>) -> Self {
        Self {
            model_name: model_name.to_string(),
            accuracy,
            secs_per_frame,
        }
    }

    /// Seconds per frame on `platform`, if measured.
    pub fn speed_on(&self, platform: &str) -> Option<f64> {
        self.secs_per_frame.get(platform).copied()
    }
}
