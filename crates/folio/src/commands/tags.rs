//! Tag table command.

use std::path::Path;

use anyhow::{Context, Result};
use folio_content::{load_posts, TagTable};

use crate::config::load_config;

/// Derive the tag table from the current posts and write it.
pub fn run(config_path: &Path) -> Result<()> {
    let file_config = load_config(config_path)?;
    let content = &file_config.content;

    let posts = load_posts(
        &content.compiled_index,
        &content.source_dir,
        &file_config.i18n.default,
    )?;

    let table = TagTable::from_posts(&posts);
    table
        .write(&content.tag_data)
        .with_context(|| format!("Failed to write {}", content.tag_data.display()))?;

    for locale in table.locales() {
        let tags = table.tags(locale);
        tracing::info!("{}: {} tags", locale, tags.len());
        for tag in tags {
            tracing::debug!("  {} ({})", tag, table.count(locale, tag));
        }
    }
    tracing::info!("Wrote {}", content.tag_data.display());

    Ok(())
}
