// Document metadata: file identity and modification state.

use std::path::{Path, PathBuf};

/// Tracks where a tab's content lives on disk and whether it has unsaved
/// changes. A document with no path is "Untitled".
#[derive(Debug, Clone, Default)]
pub struct Document {
    file_path: Option<PathBuf>,
    modified: bool,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { file_path: Some(path), modified: false }
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn set_file_path(&mut self, path: PathBuf) {
        self.file_path = Some(path);
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    /// Final path component, or "Untitled" for a pathless document.
    pub fn display_name(&self) -> String {
        self.file_path
            .as_deref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| "Untitled".to_string())
    }

    /// Back to the initial state for a fresh untitled file.
    pub fn reset(&mut self) {
        self.file_path = None;
        self.modified = false;
    }
}
