//! Error type shared by every stage of the scan

use std::io;
use std::path::PathBuf;

/// Anything that can stop a scan.
///
/// Under [`ErrorPolicy::Skip`](crate::config::ErrorPolicy::Skip) the `Walk` and
/// `Read` variants are logged and recorded instead of being returned.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("cannot access '{}': not a directory", .0.display())]
    InvalidRoot(PathBuf),

    #[error("invalid source file extension: {0:?}")]
    InvalidExtension(String),

    #[error("cannot traverse directory: {0}")]
    Walk(#[from] ignore::Error),

    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot render graph: {0}")]
    Render(#[source] io::Error),

    #[error("cannot open '{}' in a viewer: {reason}", path.display())]
    Display { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl ScanError {
    /// True for failures that only concern a single file or directory.
    pub fn is_per_entry(&self) -> bool {
        matches!(self, ScanError::Walk(_) | ScanError::Read { .. })
    }
}
