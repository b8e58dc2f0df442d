//! Test utilities for building throwaway source trees.
//!
//! Only compiled with the `test-utils` feature (tests and benchmarks).

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory of source files.
///
/// The directory is removed when dropped.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a text file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        self.add_bytes(path, content.as_bytes())
    }

    /// Add a file with raw contents, e.g. to produce invalid UTF-8.
    pub fn add_bytes(&self, path: &str, content: &[u8]) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add `count` modules spread over ten packages. Each one imports `os`,
    /// a private module, and one of `shared_every` shared modules.
    pub fn populate(&self, count: usize, shared_every: usize) {
        for i in 0..count {
            let mut body = format!("import private_{}\n", i);
            if shared_every > 0 {
                body.push_str(&format!("from shared_{} import thing\n", i % shared_every));
            }
            body.push_str("\ndef main():\n    import os\n    return os.getcwd()\n");
            self.add_file(&format!("pkg_{}/module_{}.py", i % 10, i), &body);
        }
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}
