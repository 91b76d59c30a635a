//! Page fragment loader
//!
//! The loader is a narrow stand-in for an external document extraction
//! step: it reads pre-extracted page records (one JSON object per line)
//! from the corpus directory. A missing directory yields an empty result,
//! not an error, so a fresh deployment can start serving queries before
//! any corpus has been staged.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::types::DocumentFragment;

/// Reads page-level fragments from `*.jsonl` files under a directory
pub struct PageLoader {
    source_dir: PathBuf,
}

impl PageLoader {
    /// Create a loader for the given corpus directory
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
        }
    }

    /// Load all fragments in document order.
    ///
    /// Files are visited in sorted path order so extraction runs are
    /// deterministic. Unreadable files and malformed lines are logged and
    /// skipped.
    pub fn load(&self) -> Vec<DocumentFragment> {
        if !self.source_dir.is_dir() {
            tracing::warn!(
                "corpus directory {} not found, nothing to ingest",
                self.source_dir.display()
            );
            return Vec::new();
        }

        let mut fragments = Vec::new();

        for entry in WalkDir::new(&self.source_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !is_fragment_file(entry.path()) {
                continue;
            }

            let content = match std::fs::read_to_string(entry.path()) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!("failed to read {}: {}", entry.path().display(), e);
                    continue;
                }
            };

            let before = fragments.len();
            for (line_no, line) in content.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<DocumentFragment>(line) {
                    Ok(fragment) => fragments.push(fragment),
                    Err(e) => {
                        tracing::warn!(
                            "skipping malformed fragment at {}:{}: {}",
                            entry.path().display(),
                            line_no + 1,
                            e
                        );
                    }
                }
            }

            tracing::debug!(
                "loaded {} fragments from {}",
                fragments.len() - before,
                entry.path().display()
            );
        }

        tracing::info!("loaded {} page fragments", fragments.len());
        fragments
    }
}

fn is_fragment_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("jsonl"))
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_yields_empty() {
        let loader = PageLoader::new("/nonexistent/corpus/dir");
        assert!(loader.load().is_empty());
    }

    #[test]
    fn fragment_files_filter_by_extension() {
        assert!(!is_fragment_file(Path::new("/tmp/notes.txt")));
        assert!(!is_fragment_file(Path::new("/tmp")));
    }
}
