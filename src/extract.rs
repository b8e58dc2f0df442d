//! Import extraction from source files
//!
//! A line counts as an import when, after optional leading whitespace, it
//! starts with `import` or `from` followed by whitespace. The dotted name
//! right after the keyword is captured. Nothing is resolved: the name is kept
//! exactly as written, and a matching line inside a multi-line string counts
//! just like a real statement.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ScanError;

static IMPORT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:import|from)\s+([A-Za-z0-9_.]+)").expect("IMPORT_LINE regex is invalid")
});

/// Return the module name imported by a single line, if any.
pub fn module_name(line: &str) -> Option<&str> {
    IMPORT_LINE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extract the distinct module names imported by a block of source text.
///
/// `\n`, `\r\n` and a lone `\r` all end a line.
pub fn extract_imports_from_str(content: &str) -> BTreeSet<String> {
    content
        .split(['\n', '\r'])
        .filter_map(module_name)
        .map(str::to_string)
        .collect()
}

/// Read a file and extract the distinct module names it imports.
///
/// The file must be valid UTF-8; anything else is reported as a read error.
pub fn extract_imports(path: &Path) -> Result<BTreeSet<String>, ScanError> {
    let content = std::fs::read_to_string(path).map_err(|source| ScanError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(extract_imports_from_str(&content))
}
