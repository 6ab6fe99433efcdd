//! Feed generation command.

use std::path::Path;

use anyhow::{Context, Result};
use folio_content::load_posts;
use folio_feed::FeedGenerator;

use crate::config::load_config;

/// Run the feed command.
pub fn run(config_path: &Path, locales: Vec<String>) -> Result<()> {
    let file_config = load_config(config_path)?;
    let feed_config = file_config.feed_config();

    let posts = load_posts(
        &file_config.content.compiled_index,
        &file_config.content.source_dir,
        &feed_config.locales.default,
    )?;

    let report = FeedGenerator::new(feed_config)?
        .generate(&posts, &locales)
        .context("Feed generation failed")?;

    for path in &report.written {
        tracing::debug!("{}", path.display());
    }
    if !report.skipped_locales.is_empty() {
        tracing::info!(
            "No feed for locales without posts: {}",
            report.skipped_locales.join(", ")
        );
    }

    Ok(())
}
