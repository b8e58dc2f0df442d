//! Scan orchestration: discovery, extraction, correlation

use serde::Serialize;
use tracing::info;

use crate::config::ScanConfig;
use crate::discovery::find_source_files;
use crate::error::ScanError;
use crate::graph::DependencyGraph;
use crate::import_map::{ImportMap, SkippedFile};

/// Result of one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub import_map: ImportMap,
    #[serde(rename = "dependency_graph")]
    pub graph: DependencyGraph,
    /// Files left out because they could not be read.
    pub skipped: Vec<SkippedFile>,
}

/// Run discovery, extraction and correlation for one directory tree.
///
/// Nothing is printed or drawn here; callers decide what to do with the
/// result.
pub fn analyze(config: &ScanConfig) -> Result<Analysis, ScanError> {
    let files = find_source_files(config)?;
    let (import_map, skipped) = ImportMap::build(&files, config.on_error)?;
    let graph = DependencyGraph::from_import_map(&import_map);

    info!(
        root = %config.root.display(),
        files = import_map.len(),
        edges = graph.edge_count(),
        skipped = skipped.len(),
        "analysis complete"
    );
    Ok(Analysis {
        import_map,
        graph,
        skipped,
    })
}
