//! Source file discovery
//!
//! Walks the scan root and collects every file carrying the configured
//! extension. A directory whose name contains an excluded name, or matches
//! it as a glob, is pruned together with everything below it. Symlinked
//! directories are never entered; symlinked files are collected like
//! regular ones.

use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;

use glob::Pattern;
use ignore::{DirEntry, WalkBuilder};
use tracing::{debug, warn};

use crate::config::{ErrorPolicy, ScanConfig};
use crate::error::ScanError;

/// Matcher for directory names that must not be descended into.
#[derive(Debug, Clone, Default)]
pub struct ExcludedDirs {
    names: Vec<String>,
    patterns: Vec<Pattern>,
}

impl ExcludedDirs {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        let names: Vec<String> = names.iter().map(|n| n.as_ref().to_string()).collect();
        let patterns = names
            .iter()
            .filter_map(|n| Pattern::new(n).ok())
            .collect();
        Self { names, patterns }
    }

    /// Check a single directory name against the exclusion list.
    ///
    /// A name is excluded when it contains any listed name, so `.venv` also
    /// covers `.venv_old` and `my.venv.d`.
    pub fn matches(&self, name: &OsStr) -> bool {
        let name = name.to_string_lossy();
        self.names.iter().any(|n| name.contains(n.as_str()))
            || self.patterns.iter().any(|p| p.matches(&name))
    }
}

/// True for regular files and for symlinks that do not point at a directory.
///
/// Dangling links are kept so that reading them reports the failure.
fn is_file_entry(entry: &DirEntry) -> bool {
    if entry.path_is_symlink() {
        return !fs::metadata(entry.path()).is_ok_and(|meta| meta.is_dir());
    }
    entry.file_type().is_some_and(|ft| ft.is_file())
}

/// Collect the full paths of all source files below `config.root`.
///
/// Paths come back sorted by file name at every directory level. An invalid
/// root is always an error; failures further down follow `config.on_error`.
pub fn find_source_files(config: &ScanConfig) -> Result<Vec<PathBuf>, ScanError> {
    config.validate()?;

    let excluded = ExcludedDirs::new(&config.excluded_dirs);
    let mut builder = WalkBuilder::new(&config.root);
    builder
        .standard_filters(config.respect_gitignore)
        .require_git(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            // The root is never pruned, only directories below it
            entry.depth() == 0
                || !entry.file_type().is_some_and(|ft| ft.is_dir())
                || !excluded.matches(entry.file_name())
        });

    let mut files = Vec::new();
    for result in builder.build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => match config.on_error {
                ErrorPolicy::Abort => return Err(ScanError::Walk(err)),
                ErrorPolicy::Skip => {
                    warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            },
        };

        if !is_file_entry(&entry) {
            continue;
        }
        let is_source = config.is_source_file_name(&entry.file_name().to_string_lossy());
        if is_source {
            files.push(entry.into_path());
        }
    }

    debug!(root = %config.root.display(), files = files.len(), "discovered source files");
    Ok(files)
}
