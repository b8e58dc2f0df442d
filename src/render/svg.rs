//! Standalone SVG output

use std::io::{self, Write};

use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;

use super::Renderer;
use crate::layout::{LayoutOptions, Point, spring_layout};

const WIDTH: f64 = 1200.0;
const HEIGHT: f64 = 800.0;
const MARGIN: f64 = 80.0;
const TITLE_HEIGHT: f64 = 40.0;
const NODE_RADIUS: f64 = 25.0;
const NODE_COLOR: &str = "lightblue";
const ARROW_SIZE: f64 = 10.0;

/// Draws the graph with a spring layout: labeled nodes, directed arrows and
/// a title.
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    layout: LayoutOptions,
}

impl SvgRenderer {
    pub fn new(layout: LayoutOptions) -> Self {
        Self { layout }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(LayoutOptions {
            seed,
            ..Default::default()
        })
    }

    /// Map layout coordinates in [-1, 1] onto the drawing area.
    fn to_canvas(p: Point) -> Point {
        let half_w = (WIDTH - 2.0 * MARGIN) / 2.0;
        let half_h = (HEIGHT - 2.0 * MARGIN - TITLE_HEIGHT) / 2.0;
        Point::new(
            WIDTH / 2.0 + p.x * half_w,
            TITLE_HEIGHT + HEIGHT / 2.0 - p.y * half_h,
        )
    }
}

impl Renderer for SvgRenderer {
    fn render(&self, graph: &DiGraph<String, ()>, out: &mut dyn Write) -> io::Result<()> {
        let positions: Vec<Point> = spring_layout(graph, &self.layout)
            .into_iter()
            .map(Self::to_canvas)
            .collect();

        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = WIDTH,
            h = HEIGHT
        )?;
        writeln!(out, "  <defs>")?;
        writeln!(
            out,
            r#"    <marker id="arrow" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="{s}" markerHeight="{s}" markerUnits="userSpaceOnUse" orient="auto">"#,
            s = ARROW_SIZE
        )?;
        writeln!(out, r#"      <path d="M 0 0 L 10 5 L 0 10 z" fill="black"/>"#)?;
        writeln!(out, "    </marker>")?;
        writeln!(out, "  </defs>")?;
        writeln!(out, r#"  <rect width="100%" height="100%" fill="white"/>"#)?;
        writeln!(
            out,
            r#"  <text x="{x}" y="{y}" text-anchor="middle" font-family="sans-serif" font-size="18">Dependency Graph</text>"#,
            x = WIDTH / 2.0,
            y = TITLE_HEIGHT
        )?;

        writeln!(out, r#"  <g stroke="black" stroke-width="1">"#)?;
        for edge in graph.edge_references() {
            let from = positions[edge.source().index()];
            let to = positions[edge.target().index()];
            if let Some((start, end)) = trim_to_circles(from, to, NODE_RADIUS) {
                writeln!(
                    out,
                    r#"    <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" marker-end="url(#arrow)"/>"#,
                    start.x, start.y, end.x, end.y
                )?;
            }
        }
        writeln!(out, "  </g>")?;

        writeln!(
            out,
            r#"  <g font-family="sans-serif" font-size="10" font-weight="bold" text-anchor="middle">"#
        )?;
        for idx in graph.node_indices() {
            let p = positions[idx.index()];
            writeln!(
                out,
                r#"    <circle cx="{:.1}" cy="{:.1}" r="{}" fill="{}"/>"#,
                p.x, p.y, NODE_RADIUS, NODE_COLOR
            )?;
            writeln!(
                out,
                r#"    <text x="{:.1}" y="{:.1}" dominant-baseline="central">{}</text>"#,
                p.x,
                p.y,
                escape(&graph[idx])
            )?;
        }
        writeln!(out, "  </g>")?;

        writeln!(out, "</svg>")
    }

    fn extension(&self) -> &'static str {
        "svg"
    }
}

/// Shorten a segment so it starts and ends on the node circles.
///
/// Returns `None` when the circles overlap and there is nothing to draw.
fn trim_to_circles(from: Point, to: Point, radius: f64) -> Option<(Point, Point)> {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let length = (dx * dx + dy * dy).sqrt();
    if length <= 2.0 * radius {
        return None;
    }
    let (ux, uy) = (dx / length, dy / length);
    Some((
        Point::new(from.x + ux * radius, from.y + uy * radius),
        Point::new(to.x - ux * radius, to.y - uy * radius),
    ))
}

/// Escape text content for XML.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
