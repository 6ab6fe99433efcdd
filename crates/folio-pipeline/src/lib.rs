//! Build pipeline for the folio site.
//!
//! Runs the content compiler and the site bundler as child processes,
//! patches generated modules between them, and after bundling re-patches
//! the generated index and regenerates RSS feeds.

pub mod orchestrator;
pub mod postbuild;
pub mod process;

pub use orchestrator::{BuildConfig, BuildOutcome, BuildPolicy, Orchestrator};
pub use postbuild::{PostBuildConfig, PostBuildDriver, PostBuildOutcome};
pub use process::{append_node_options, CommandSpec, StepStatus};

use std::path::PathBuf;

/// Errors that can occur while running the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("No command configured for the {0} step")]
    EmptyCommand(&'static str),

    #[error("Failed to start {program}: {message}")]
    Spawn { program: String, message: String },

    #[error("Failed to clean {path}: {message}")]
    Clean { path: PathBuf, message: String },

    #[error(transparent)]
    Content(#[from] folio_content::ContentError),

    #[error(transparent)]
    Feed(#[from] folio_feed::FeedError),
}
