//! Configuration types for a scan

use std::path::PathBuf;

use crate::error::ScanError;

/// Directory names skipped when none are given explicitly.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[".venv"];

/// Extension of the files that count as source files, without the dot.
pub const DEFAULT_EXTENSION: &str = "py";

/// What to do when a single file or directory cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Log a warning, remember the entry and keep scanning.
    #[default]
    Skip,
    /// Stop the whole scan at the first failure.
    Abort,
}

/// Configuration for a scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory to scan.
    pub root: PathBuf,
    /// Directory names (or glob patterns) whose contents are left out.
    pub excluded_dirs: Vec<String>,
    /// Source file extension, with or without a leading dot.
    pub extension: String,
    /// Honor .gitignore, .ignore and hidden-file rules while walking.
    pub respect_gitignore: bool,
    pub on_error: ErrorPolicy,
}

impl ScanConfig {
    /// Default configuration rooted at `root`.
    ///
    /// There is no implicit root; callers always name the directory to scan.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            extension: DEFAULT_EXTENSION.to_string(),
            respect_gitignore: false,
            on_error: ErrorPolicy::default(),
        }
    }

    /// The configured extension with any leading dot removed.
    pub fn normalized_extension(&self) -> &str {
        self.extension.trim_start_matches('.')
    }

    /// Check whether a file name counts as a source file.
    pub fn is_source_file_name(&self, name: &str) -> bool {
        let ext = self.normalized_extension();
        name.strip_suffix(ext).is_some_and(|stem| stem.ends_with('.'))
    }

    /// Reject configurations that cannot produce a scan.
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.normalized_extension().is_empty() {
            return Err(ScanError::InvalidExtension(self.extension.clone()));
        }
        if !self.root.is_dir() {
            return Err(ScanError::InvalidRoot(self.root.clone()));
        }
        Ok(())
    }
}
