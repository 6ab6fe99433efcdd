//! Configuration file (folio.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use folio_content::{Locales, SiteConfig};
use folio_feed::FeedConfig;
use folio_patch::PatchConfig;
use folio_pipeline::{BuildConfig, BuildPolicy, PostBuildConfig};

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub i18n: Locales,
    #[serde(default)]
    pub content: ContentSettings,
    #[serde(default)]
    pub build: BuildSettings,
    #[serde(default)]
    pub feed: FeedSettings,
}

#[derive(Debug, Deserialize)]
pub struct ContentSettings {
    #[serde(default = "default_generated_dir")]
    pub generated_dir: PathBuf,
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    #[serde(default = "default_index_file")]
    pub index_file: PathBuf,
    #[serde(default = "default_compiled_index")]
    pub compiled_index: PathBuf,
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,
    #[serde(default = "default_tag_data")]
    pub tag_data: PathBuf,
    /// Extension of generated modules
    #[serde(default = "default_extension")]
    pub extension: String,
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    pub compiler: Option<Vec<String>>,
    pub bundler: Option<Vec<String>>,
    pub node_options: Option<Vec<String>>,
    #[serde(default = "default_true")]
    pub retry_compile: bool,
    #[serde(default)]
    pub force_success: bool,
    #[serde(default)]
    pub clean: bool,
}

#[derive(Debug, Deserialize)]
pub struct FeedSettings {
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,
    #[serde(default = "default_feed_file")]
    pub file_name: String,
    #[serde(default = "default_blog_path")]
    pub blog_path: String,
}

fn default_generated_dir() -> PathBuf {
    PathBuf::from(".contentlayer/generated")
}
fn default_cache_dir() -> PathBuf {
    PathBuf::from(".contentlayer/.cache")
}
fn default_index_file() -> PathBuf {
    PathBuf::from(".contentlayer/generated/index.mjs")
}
fn default_compiled_index() -> PathBuf {
    PathBuf::from(".contentlayer/generated/Blog/_index.json")
}
fn default_source_dir() -> PathBuf {
    PathBuf::from("data/blog")
}
fn default_tag_data() -> PathBuf {
    PathBuf::from("app/[locale]/tag-data.json")
}
fn default_extension() -> String {
    "mjs".to_string()
}
fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}
fn default_feed_file() -> String {
    "feed.xml".to_string()
}
fn default_blog_path() -> String {
    "blog".to_string()
}
fn default_true() -> bool {
    true
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            generated_dir: default_generated_dir(),
            cache_dir: default_cache_dir(),
            index_file: default_index_file(),
            compiled_index: default_compiled_index(),
            source_dir: default_source_dir(),
            tag_data: default_tag_data(),
            extension: default_extension(),
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            compiler: None,
            bundler: None,
            node_options: None,
            retry_compile: true,
            force_success: false,
            clean: false,
        }
    }
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            public_dir: default_public_dir(),
            file_name: default_feed_file(),
            blog_path: default_blog_path(),
        }
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    tracing::debug!("{} not found, using defaults", path.display());
    Ok(ConfigFile::default())
}

impl ConfigFile {
    pub fn patch_config(&self) -> PatchConfig {
        PatchConfig {
            extension: self.content.extension.clone(),
        }
    }

    /// Generated and cache directories, in patch order.
    pub fn patch_roots(&self) -> Vec<PathBuf> {
        vec![
            self.content.generated_dir.clone(),
            self.content.cache_dir.clone(),
        ]
    }

    pub fn build_config(&self) -> BuildConfig {
        let defaults = BuildConfig::default();
        BuildConfig {
            compiler: self.build.compiler.clone().unwrap_or(defaults.compiler),
            bundler: self.build.bundler.clone().unwrap_or(defaults.bundler),
            node_options: self
                .build
                .node_options
                .clone()
                .unwrap_or(defaults.node_options),
            patch_roots: self.patch_roots(),
            patch: self.patch_config(),
            policy: BuildPolicy {
                retry_compile: self.build.retry_compile,
                force_success: self.build.force_success,
                clean: self.build.clean,
                skip_bundle: false,
            },
        }
    }

    pub fn feed_config(&self) -> FeedConfig {
        FeedConfig {
            site: self.site.clone(),
            locales: self.i18n.clone(),
            public_dir: self.feed.public_dir.clone(),
            tag_data: self.content.tag_data.clone(),
            file_name: self.feed.file_name.clone(),
            blog_path: self.feed.blog_path.clone(),
        }
    }

    pub fn postbuild_config(&self, locales: Vec<String>) -> PostBuildConfig {
        PostBuildConfig {
            index_file: self.content.index_file.clone(),
            patch: self.patch_config(),
            compiled_index: self.content.compiled_index.clone(),
            source_dir: self.content.source_dir.clone(),
            feed: self.feed_config(),
            locales,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn parses_full_config() {
        let config: ConfigFile = toml::from_str(
            r#"
[site]
url = "https://example.com"
title = "Example"
author = "Jane"
email = "jane@example.com"

[site.locales.es]
title = "Ejemplo"

[i18n]
default_locale = "es"
locales = ["es", "en"]

[content]
extension = "js"

[build]
compiler = ["npx", "contentlayer", "build"]
force_success = true

[feed]
public_dir = "out"
"#,
        )
        .unwrap();

        assert_eq!(config.site.title_for("es"), "Ejemplo");
        assert_eq!(config.i18n.default, "es");
        assert_eq!(config.i18n.supported, vec!["es", "en"]);

        let build = config.build_config();
        assert_eq!(build.compiler, vec!["npx", "contentlayer", "build"]);
        assert_eq!(build.bundler, BuildConfig::default().bundler);
        assert!(build.policy.force_success);
        assert!(build.policy.retry_compile);
        assert_eq!(build.patch.extension, "js");

        let feed = config.feed_config();
        assert_eq!(feed.public_dir, PathBuf::from("out"));
        assert_eq!(feed.tag_data, PathBuf::from("app/[locale]/tag-data.json"));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempdir().unwrap();

        let config = load_config(&temp.path().join("folio.toml")).unwrap();

        assert_eq!(config.i18n, Locales::default());
        assert!(!config.build.force_success);
        assert_eq!(
            config.patch_roots(),
            vec![
                PathBuf::from(".contentlayer/generated"),
                PathBuf::from(".contentlayer/.cache")
            ]
        );
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("folio.toml");
        fs::write(&path, "[build\nforce_success = ").unwrap();

        assert!(load_config(&path).is_err());
    }
}
