//! Import-attribute patcher for generated modules.
//!
//! The content compiler emits `import data from './x.json' assert { type: 'json' }`,
//! which current module loaders reject. This crate rewrites those clauses to
//! `with { type: 'json' }` in place, touching only files that change.

pub mod patcher;
pub mod report;
pub mod rewrite;

pub use patcher::{ArtifactPatcher, PatchConfig};
pub use report::{FileOutcome, FileReport, PatchError, PatchReport};
pub use rewrite::{rewrite_import_attributes, Rewrite};
