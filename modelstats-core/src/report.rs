//! Frontier report: the per-platform frontiers written as JSON.
//!
//! ```json
//! [
//!   {
//!     "platform": "pi3",
//!     "frontier_models": [["mobilenet", 0.21, 68.4, 88.2], ...]
//!   }
//! ]
//! ```

use crate::error::{ModelStatsError, Result};
use crate::frontier::FrontierPoint;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The frontier of one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformFrontier {
    pub platform: String,
    pub frontier_models: Vec<FrontierPoint>,
}

/// Frontiers of every known platform, in platform order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrontierReport(Vec<PlatformFrontier>);

impl FrontierReport {
    pub fn new(platforms: Vec<PlatformFrontier>) -> Self {
        Self(platforms)
    }

    pub fn platforms(&self) -> &[PlatformFrontier] {
        &self.0
    }

    pub fn get(&self, platform: &str) -> Option<&PlatformFrontier> {
        self.0.iter().find(|p| p.platform == platform)
    }

    /// Pretty JSON, two-space indented, non-ASCII kept as-is.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Atomically write the report to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        atomic_write(path, json.as_bytes()).map_err(|e| ModelStatsError::write(path, e))?;
        tracing::info!(
            path = %path.display(),
            platforms = self.0.len(),
            "Saved frontier report"
        );
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Write `data` to a `.tmp` sibling, then rename it over `path`.
///
/// Creates parent directories if they don't exist.
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, data)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
