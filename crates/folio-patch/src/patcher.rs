//! Best-effort patch pass over generated module trees.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use folio_content::walk::find_files_with_extension;

use crate::report::{FileOutcome, PatchError, PatchReport};
use crate::rewrite::rewrite_import_attributes;

/// Configuration for the patcher.
#[derive(Debug, Clone)]
pub struct PatchConfig {
    /// Extension of generated modules, without the dot
    pub extension: String,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            extension: "mjs".to_string(),
        }
    }
}

/// Rewrites legacy import assertions in generated modules.
#[derive(Debug, Clone, Default)]
pub struct ArtifactPatcher {
    config: PatchConfig,
}

impl ArtifactPatcher {
    /// Create a new patcher.
    pub fn new(config: PatchConfig) -> Self {
        Self { config }
    }

    /// Patch every matching file below each root.
    ///
    /// Missing roots are skipped. A file that cannot be read or written is
    /// recorded as failed and does not stop the pass.
    pub fn patch_roots(&self, roots: &[PathBuf]) -> PatchReport {
        let mut report = PatchReport::default();

        for root in roots {
            if !root.exists() {
                tracing::info!("{} not found, skipping", root.display());
                continue;
            }

            let files = find_files_with_extension(root, &self.config.extension);
            tracing::debug!(
                "Found {} .{} files under {}",
                files.len(),
                self.config.extension,
                root.display()
            );

            for path in files {
                let outcome = self.patch_file(&path);
                report.push(path, outcome);
            }
        }

        tracing::info!(
            "Import attribute patch: scanned {} files, modified {}",
            report.scanned(),
            report.modified()
        );
        if report.has_failures() {
            tracing::warn!("{} files could not be patched", report.failed().len());
        }

        report
    }

    /// Patch a single file, writing it back only if its content changed.
    pub fn patch_file(&self, path: &Path) -> FileOutcome {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("{} not found, skipping", path.display());
                return FileOutcome::Missing;
            }
            Err(e) => {
                tracing::warn!("Unable to process file {}: {}", path.display(), e);
                return FileOutcome::Failed(PatchError::Read(e.to_string()));
            }
        };

        let rewrite = rewrite_import_attributes(&source);
        if !rewrite.changed() {
            return FileOutcome::Unchanged;
        }

        if let Err(e) = fs::write(path, rewrite.text.as_bytes()) {
            tracing::warn!("Unable to write file {}: {}", path.display(), e);
            return FileOutcome::Failed(PatchError::Write(e.to_string()));
        }

        tracing::info!("Fixed import attributes in: {}", path.display());
        FileOutcome::Patched {
            replacements: rewrite.replacements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::{Duration, SystemTime};
    use tempfile::tempdir;

    const LEGACY: &str = "import allBlogs from './Blog/_index.json' assert { type: 'json' }\n";

    #[test]
    fn patches_nested_modules() {
        let temp = tempdir().unwrap();
        let generated = temp.path().join("generated");
        let nested = generated.join("Blog");
        fs::create_dir_all(&nested).unwrap();
        fs::write(generated.join("index.mjs"), LEGACY).unwrap();
        fs::write(nested.join("_index.mjs"), "export default [];\n").unwrap();
        fs::write(nested.join("_index.json"), "assert { type: 'json' }").unwrap();

        let report = ArtifactPatcher::default().patch_roots(&[generated.clone()]);

        assert_eq!(report.scanned(), 2);
        assert_eq!(report.modified(), 1);
        assert_eq!(
            fs::read_to_string(generated.join("index.mjs")).unwrap(),
            "import allBlogs from './Blog/_index.json' with { type: 'json' }\n"
        );
        // Other extensions are never touched
        assert_eq!(
            fs::read_to_string(nested.join("_index.json")).unwrap(),
            "assert { type: 'json' }"
        );
    }

    #[test]
    fn second_run_modifies_nothing() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("index.mjs"), LEGACY).unwrap();
        let patcher = ArtifactPatcher::default();
        let roots = vec![temp.path().to_path_buf()];

        let first = patcher.patch_roots(&roots);
        let second = patcher.patch_roots(&roots);

        assert_eq!(first.modified(), 1);
        assert_eq!(second.modified(), 0);
        assert_eq!(second.scanned(), 1);
    }

    #[test]
    fn clean_files_are_not_rewritten() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("clean.mjs");
        fs::write(&path, "export const x = 1;\n").unwrap();

        let old = SystemTime::now() - Duration::from_secs(3600);
        fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(old)
            .unwrap();

        let outcome = ArtifactPatcher::default().patch_file(&path);

        assert_eq!(outcome, FileOutcome::Unchanged);
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), old);
        assert_eq!(fs::read_to_string(&path).unwrap(), "export const x = 1;\n");
    }

    #[test]
    fn missing_roots_are_nothing_to_do() {
        let temp = tempdir().unwrap();

        let report = ArtifactPatcher::default().patch_roots(&[
            temp.path().join("generated"),
            temp.path().join(".cache"),
        ]);

        assert_eq!(report.scanned(), 0);
        assert_eq!(report.modified(), 0);
    }

    #[test]
    fn missing_single_file_is_reported() {
        let temp = tempdir().unwrap();

        let outcome = ArtifactPatcher::default().patch_file(&temp.path().join("index.mjs"));

        assert_eq!(outcome, FileOutcome::Missing);
    }

    #[test]
    fn unreadable_file_does_not_abort_the_pass() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.mjs"), [0xff, 0xfe, 0x00]).unwrap();
        fs::write(temp.path().join("b.mjs"), LEGACY).unwrap();

        let report = ArtifactPatcher::default().patch_roots(&[temp.path().to_path_buf()]);

        assert_eq!(report.failed().len(), 1);
        assert_eq!(report.modified(), 1);
        assert!(fs::read_to_string(temp.path().join("b.mjs"))
            .unwrap()
            .contains("with { type: 'json' }"));
    }

    #[test]
    fn honors_configured_extension() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.js"), LEGACY).unwrap();
        fs::write(temp.path().join("b.mjs"), LEGACY).unwrap();

        let patcher = ArtifactPatcher::new(PatchConfig {
            extension: "js".to_string(),
        });
        let report = patcher.patch_roots(&[temp.path().to_path_buf()]);

        assert_eq!(report.modified(), 1);
        assert!(fs::read_to_string(temp.path().join("b.mjs"))
            .unwrap()
            .contains("assert"));
    }
}
