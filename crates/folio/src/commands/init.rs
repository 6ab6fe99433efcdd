//! Write a starter folio.toml.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    tracing::info!("Created {}", config_path.display());
    tracing::info!("Run 'folio build' to compile and bundle the site.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Folio Configuration

[site]
# Absolute site URL used in feed links
url = "http://localhost:3000"
title = "Blog"
description = ""
author = ""
email = ""

# Per-locale overrides
# [site.locales.es]
# title = "Blog"
# description = ""

[i18n]
default_locale = "en"
locales = ["en", "es"]

[content]
generated_dir = ".contentlayer/generated"
cache_dir = ".contentlayer/.cache"
index_file = ".contentlayer/generated/index.mjs"
compiled_index = ".contentlayer/generated/Blog/_index.json"
source_dir = "data/blog"
tag_data = "app/[locale]/tag-data.json"
extension = "mjs"

[build]
# compiler = ["node", "--experimental-json-modules", "--no-warnings", "./node_modules/.bin/contentlayer", "build"]
# bundler = ["node", "--experimental-json-modules", "--no-warnings", "./node_modules/.bin/next", "build"]
retry_compile = true
force_success = false
clean = false

[feed]
public_dir = "public"
file_name = "feed.xml"
blog_path = "blog"
"#;
