//! Recursive directory walk shared by the patcher, the source loader and
//! the clean step.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Find every regular file below `root` accepted by `predicate`.
///
/// A missing root yields an empty list. Entries that cannot be read are
/// skipped with a warning. Results are sorted so repeated runs visit files
/// in the same order.
pub fn find_files<F>(root: &Path, mut predicate: F) -> Vec<PathBuf>
where
    F: FnMut(&Path) -> bool,
{
    if !root.exists() {
        return Vec::new();
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if predicate(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    files
}

/// Find every file below `root` whose extension equals `ext` (without the dot).
pub fn find_files_with_extension(root: &Path, ext: &str) -> Vec<PathBuf> {
    find_files(root, |path| has_extension(path, ext))
}

/// Check a path's extension, ignoring a leading dot in `ext`.
pub fn has_extension(path: &Path, ext: &str) -> bool {
    let ext = ext.trim_start_matches('.');
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == ext)
}
