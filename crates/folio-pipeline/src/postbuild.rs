//! Steps run after the bundler: re-patch the generated index, then feeds.

use std::path::PathBuf;

use folio_content::load_posts;
use folio_feed::{FeedConfig, FeedGenerator, FeedReport};
use folio_patch::{ArtifactPatcher, FileOutcome, PatchConfig};

use crate::PipelineError;

/// Configuration for the post-build steps.
#[derive(Debug, Clone)]
pub struct PostBuildConfig {
    /// Generated index module patched after bundling
    pub index_file: PathBuf,

    pub patch: PatchConfig,

    /// Compiler's JSON document index
    pub compiled_index: PathBuf,

    /// Markdown sources, read when the compiled index is missing
    pub source_dir: PathBuf,

    pub feed: FeedConfig,

    /// Locales to generate; empty means all supported locales
    pub locales: Vec<String>,
}

impl Default for PostBuildConfig {
    fn default() -> Self {
        Self {
            index_file: PathBuf::from(".contentlayer/generated/index.mjs"),
            patch: PatchConfig::default(),
            compiled_index: PathBuf::from(".contentlayer/generated/Blog/_index.json"),
            source_dir: PathBuf::from("data/blog"),
            feed: FeedConfig::default(),
            locales: Vec::new(),
        }
    }
}

/// What the post-build steps did.
#[derive(Debug)]
pub struct PostBuildOutcome {
    pub index_patch: FileOutcome,
    pub feeds: FeedReport,
}

/// Runs the post-build steps in order.
pub struct PostBuildDriver {
    config: PostBuildConfig,
}

impl PostBuildDriver {
    /// Create a new post-build driver.
    pub fn new(config: PostBuildConfig) -> Self {
        Self { config }
    }

    /// Patch the index module, then generate feeds.
    ///
    /// The patch step never fails the run: a missing or unwritable index is
    /// logged and feed generation still happens.
    pub fn run(&self) -> Result<PostBuildOutcome, PipelineError> {
        let patcher = ArtifactPatcher::new(self.config.patch.clone());
        let index_patch = patcher.patch_file(&self.config.index_file);
        match &index_patch {
            FileOutcome::Failed(e) => {
                tracing::warn!(
                    "Could not patch {}: {}; continuing with feeds",
                    self.config.index_file.display(),
                    e
                );
            }
            FileOutcome::Unchanged => {
                tracing::info!("{} already up to date", self.config.index_file.display());
            }
            _ => {}
        }

        let posts = load_posts(
            &self.config.compiled_index,
            &self.config.source_dir,
            &self.config.feed.locales.default,
        )?;

        let generator = FeedGenerator::new(self.config.feed.clone())?;
        let feeds = generator.generate(&posts, &self.config.locales)?;

        Ok(PostBuildOutcome { index_patch, feeds })
    }
}
