//! Import map: base file name to the set of module names it imports

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ErrorPolicy;
use crate::error::ScanError;
use crate::extract::extract_imports;

/// A file that was left out of the scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Mapping from base file name to the module names that file imports.
///
/// Files in different directories that share a base name end up under the
/// same key with their imports merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImportMap {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl ImportMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract imports from every file and key them by base file name.
    ///
    /// With [`ErrorPolicy::Skip`] an unreadable file is logged, returned in
    /// the skipped list and left out of the map. With [`ErrorPolicy::Abort`]
    /// the first failure is returned.
    pub fn build<P: AsRef<Path>>(
        files: &[P],
        policy: ErrorPolicy,
    ) -> Result<(Self, Vec<SkippedFile>), ScanError> {
        let mut map = Self::new();
        let mut skipped = Vec::new();

        for path in files {
            let path = path.as_ref();
            let imports = match extract_imports(path) {
                Ok(imports) => imports,
                Err(err) if policy == ErrorPolicy::Skip && err.is_per_entry() => {
                    warn!(file = %path.display(), error = %err, "skipping file");
                    skipped.push(SkippedFile {
                        path: path.to_path_buf(),
                        reason: err.to_string(),
                    });
                    continue;
                }
                Err(err) => return Err(err),
            };
            map.insert(file_name(path), imports);
        }

        debug!(
            files = map.len(),
            imports = map.total_imports(),
            skipped = skipped.len(),
            "built import map"
        );
        Ok((map, skipped))
    }

    /// Merge a set of imports into the entry for `file`.
    pub fn insert(&mut self, file: impl Into<String>, imports: BTreeSet<String>) {
        self.entries.entry(file.into()).or_default().extend(imports);
    }

    pub fn get(&self, file: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(file)
    }

    /// Iterate entries in file name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.entries.iter()
    }

    pub fn files(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of (file, module) pairs.
    pub fn total_imports(&self) -> usize {
        self.entries.values().map(BTreeSet::len).sum()
    }
}

impl FromIterator<(String, BTreeSet<String>)> for ImportMap {
    fn from_iter<I: IntoIterator<Item = (String, BTreeSet<String>)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (file, imports) in iter {
            map.insert(file, imports);
        }
        map
    }
}

/// Base name of a path, falling back to the full path when there is none.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
