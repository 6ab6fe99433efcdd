//! Per-file patch outcomes and the aggregated report.

use std::path::PathBuf;

/// Why a single file could not be patched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PatchError {
    #[error("Unable to read file: {0}")]
    Read(String),

    #[error("Unable to write file: {0}")]
    Write(String),
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// No legacy clause present; the file was not written
    Unchanged,

    /// Legacy clauses were rewritten and the file saved
    Patched { replacements: usize },

    /// The file does not exist
    Missing,

    /// Reading or writing failed; the file was skipped
    Failed(PatchError),
}

/// A file and its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

/// Summary of a patch pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchReport {
    pub files: Vec<FileReport>,
}

impl PatchReport {
    pub fn push(&mut self, path: PathBuf, outcome: FileOutcome) {
        self.files.push(FileReport { path, outcome });
    }

    /// Append another report's files.
    pub fn merge(&mut self, other: PatchReport) {
        self.files.extend(other.files);
    }

    /// Files that existed and were examined.
    pub fn scanned(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.outcome != FileOutcome::Missing)
            .count()
    }

    /// Files rewritten on disk.
    pub fn modified(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Patched { .. }))
            .count()
    }

    /// Total clauses replaced across all files.
    pub fn replacements(&self) -> usize {
        self.files
            .iter()
            .map(|f| match f.outcome {
                FileOutcome::Patched { replacements } => replacements,
                _ => 0,
            })
            .sum()
    }

    /// Files skipped because of an I/O error.
    pub fn failed(&self) -> Vec<&FileReport> {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Failed(_)))
            .collect()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_outcome() {
        let mut report = PatchReport::default();
        report.push("a.mjs".into(), FileOutcome::Unchanged);
        report.push("b.mjs".into(), FileOutcome::Patched { replacements: 2 });
        report.push("c.mjs".into(), FileOutcome::Missing);

        let mut other = PatchReport::default();
        other.push(
            "d.mjs".into(),
            FileOutcome::Failed(PatchError::Read("denied".to_string())),
        );
        report.merge(other);

        assert_eq!(report.scanned(), 3);
        assert_eq!(report.modified(), 1);
        assert_eq!(report.replacements(), 2);
        assert_eq!(report.failed().len(), 1);
        assert!(report.has_failures());
    }
}
