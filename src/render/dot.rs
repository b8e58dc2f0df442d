//! Graphviz DOT output

use std::io::{self, Write};

use petgraph::graph::DiGraph;

use super::Renderer;

/// Writes the graph as a Graphviz `digraph`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotRenderer;

impl Renderer for DotRenderer {
    fn render(&self, graph: &DiGraph<String, ()>, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "digraph dependencies {{")?;
        writeln!(out, "    label=\"Dependency Graph\";")?;
        writeln!(
            out,
            "    node [shape=ellipse, style=filled, fillcolor=lightblue, fontname=\"Helvetica-Bold\", fontsize=10];"
        )?;

        for idx in graph.node_indices() {
            writeln!(out, "    \"{}\";", escape(&graph[idx]))?;
        }
        for edge in graph.edge_indices() {
            if let Some((from, to)) = graph.edge_endpoints(edge) {
                writeln!(
                    out,
                    "    \"{}\" -> \"{}\";",
                    escape(&graph[from]),
                    escape(&graph[to])
                )?;
            }
        }

        writeln!(out, "}}")
    }

    fn extension(&self) -> &'static str {
        "dot"
    }
}

/// Escape a name for use inside a quoted DOT identifier.
fn escape(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}
