//! Client-side file downloads.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Write a named export into the output directory, creating it if needed.
pub fn save(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output dir: {}", dir.display()))?;
    let path = dir.join(name);
    std::fs::write(&path, contents)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
