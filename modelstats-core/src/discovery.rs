//! Model folder discovery.
//!
//! The hierarchy is assumed to be:
//!
//! ```text
//! models_root/
//!     model1/
//!     model2/
//! ```
//!
//! where each child folder holds that model's metadata and is named after it.

use crate::error::{ModelStatsError, Result};
use std::path::Path;

/// Fail early when the models root is missing or not a directory.
pub fn ensure_models_root(root: &Path) -> Result<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(ModelStatsError::ModelsRootNotFound {
            path: root.to_path_buf(),
        })
    }
}

/// Names of the model folders directly under `root`, sorted.
pub fn discover_models(root: &Path) -> Result<Vec<String>> {
    ensure_models_root(root)?;

    let mut models = Vec::new();
    for entry in walkdir::WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(root = %root.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        match entry.file_name().to_str() {
            Some(name) => models.push(name.to_string()),
            None => tracing::warn!(
                path = %entry.path().display(),
                "Skipping model folder with a non UTF-8 name"
            ),
        }
    }
    models.sort();

    tracing::info!(root = %root.display(), count = models.len(), "Discovered model folders");
    Ok(models)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_immediate_subdirectories_only() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("resnet18").join("timing")).unwrap();
        std::fs::create_dir_all(dir.path().join("alexnet")).unwrap();
        std::fs::write(dir.path().join("README.md"), "models").unwrap();

        let models = discover_models(dir.path()).unwrap();
        assert_eq!(models, vec!["alexnet", "resnet18"]);
    }

    #[test]
    fn test_discover_empty_root() {
        let dir = TempDir::new().unwrap();
        assert!(discover_models(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let err = discover_models(&missing).unwrap_err();
        assert!(matches!(err, ModelStatsError::ModelsRootNotFound { .. }));
    }

    #[test]
    fn test_file_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("models.txt");
        std::fs::write(&file, "").unwrap();
        assert!(ensure_models_root(&file).is_err());
    }
}
