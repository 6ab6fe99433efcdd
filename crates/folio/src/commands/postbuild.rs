//! Post-build command.

use std::path::Path;

use anyhow::{Context, Result};
use folio_patch::FileOutcome;
use folio_pipeline::PostBuildDriver;

use crate::config::load_config;

/// Run the post-build command.
pub fn run(config_path: &Path, locales: Vec<String>) -> Result<()> {
    let file_config = load_config(config_path)?;
    let config = file_config.postbuild_config(locales);

    let outcome = PostBuildDriver::new(config)
        .run()
        .context("Post-build failed")?;

    if let FileOutcome::Patched { replacements } = outcome.index_patch {
        tracing::info!("Patched {} import assertions in the generated index", replacements);
    }
    tracing::info!("Wrote {} feeds", outcome.feeds.written.len());

    Ok(())
}
