//! Graph rendering
//!
//! Renderers turn the rendered graph into a document written to any
//! `io::Write`. The binary either writes that document to a chosen file, or
//! drops it into a temporary file that is handed straight to the platform
//! viewer.
//!
//! - `SvgRenderer`: self-contained SVG drawn from a seeded spring layout
//! - `DotRenderer`: Graphviz source for external layout tools

mod dot;
mod svg;
mod viewer;

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use petgraph::graph::DiGraph;

use crate::error::ScanError;

pub use dot::DotRenderer;
pub use svg::SvgRenderer;
pub use viewer::open_in_viewer;

/// Backend that draws a dependency graph.
pub trait Renderer {
    fn render(&self, graph: &DiGraph<String, ()>, out: &mut dyn Write) -> std::io::Result<()>;

    /// File extension of the produced document.
    fn extension(&self) -> &'static str;
}

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    /// Standalone SVG image
    #[default]
    Svg,
    /// Graphviz DOT source
    Dot,
    /// Skip rendering
    None,
}

impl RenderFormat {
    /// Renderer for this format, or `None` when rendering is disabled.
    pub fn renderer(self, seed: u64) -> Option<Box<dyn Renderer>> {
        match self {
            RenderFormat::Svg => Some(Box::new(SvgRenderer::with_seed(seed))),
            RenderFormat::Dot => Some(Box::new(DotRenderer)),
            RenderFormat::None => None,
        }
    }
}

/// Render `graph` into a fresh `importgraph-*.<ext>` file in the system
/// temp directory and return its path.
///
/// The file outlives the process so a viewer launched on it can still read
/// it; the operating system's temp cleanup reclaims it.
pub fn render_to_temp_file(
    renderer: &dyn Renderer,
    graph: &DiGraph<String, ()>,
) -> Result<PathBuf, ScanError> {
    let suffix = format!(".{}", renderer.extension());
    let file = tempfile::Builder::new()
        .prefix("importgraph-")
        .suffix(&suffix)
        .tempfile()
        .map_err(ScanError::Render)?;
    {
        let mut out = BufWriter::new(file.as_file());
        renderer.render(graph, &mut out).map_err(ScanError::Render)?;
        out.flush().map_err(ScanError::Render)?;
    }
    let (_, path) = file.keep().map_err(|e| ScanError::Render(e.error))?;
    Ok(path)
}

/// Render `graph` into the file at `path`.
pub fn render_to_file(
    renderer: &dyn Renderer,
    graph: &DiGraph<String, ()>,
    path: &Path,
) -> Result<(), ScanError> {
    let file = std::fs::File::create(path).map_err(ScanError::Render)?;
    let mut out = BufWriter::new(file);
    renderer.render(graph, &mut out).map_err(ScanError::Render)?;
    out.flush().map_err(ScanError::Render)
}
