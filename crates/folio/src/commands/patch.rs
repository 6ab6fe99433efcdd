//! Standalone patch command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use folio_patch::ArtifactPatcher;

use crate::config::load_config;

/// Run the patch command over `dirs`, or the configured roots when empty.
pub fn run(config_path: &Path, dirs: Vec<PathBuf>) -> Result<()> {
    let file_config = load_config(config_path)?;
    let roots = if dirs.is_empty() {
        file_config.patch_roots()
    } else {
        dirs
    };

    let report = ArtifactPatcher::new(file_config.patch_config()).patch_roots(&roots);

    for failed in report.failed() {
        tracing::warn!("Skipped {}", failed.path.display());
    }
    tracing::info!(
        "Patch complete. Modified {} of {} files.",
        report.modified(),
        report.scanned()
    );

    Ok(())
}
