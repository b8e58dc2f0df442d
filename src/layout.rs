//! Seeded force-directed layout
//!
//! Fruchterman-Reingold spring layout. Nodes repel each other, edges pull
//! their endpoints together, and the step size cools linearly over the run.
//! Positions start from a seeded generator, so a given graph and seed always
//! produce the same picture.

use std::collections::HashSet;

use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;

const DEFAULT_SEED: u64 = 42;
const DEFAULT_ITERATIONS: usize = 50;
const MIN_DISTANCE: f64 = 0.01;
const CONVERGENCE_THRESHOLD: f64 = 1e-4;

/// A node position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn norm(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    pub seed: u64,
    pub iterations: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// SplitMix64, enough for reproducible starting positions.
struct SplitMix64(u64);

impl SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn undirected(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

/// Compute node positions, indexed by node index, inside [-1, 1] on both axes.
pub fn spring_layout<N, E>(graph: &DiGraph<N, E>, options: &LayoutOptions) -> Vec<Point> {
    let n = graph.node_count();
    match n {
        0 => return Vec::new(),
        1 => return vec![Point::ORIGIN],
        _ => {}
    }

    // Edge direction does not matter for the forces
    let adjacent: HashSet<(usize, usize)> = graph
        .edge_references()
        .map(|edge| undirected(edge.source().index(), edge.target().index()))
        .collect();

    let mut rng = SplitMix64(options.seed);
    let mut pos: Vec<Point> = (0..n)
        .map(|_| {
            let x = rng.next_f64();
            Point::new(x, rng.next_f64())
        })
        .collect();

    let k = (1.0 / n as f64).sqrt();
    let mut temperature = extent(&pos) * 0.1;
    let cooling = temperature / (options.iterations as f64 + 1.0);

    for _ in 0..options.iterations {
        let mut moved = 0.0;
        let mut next = pos.clone();

        for i in 0..n {
            let mut disp = Point::ORIGIN;
            for j in 0..n {
                if i == j {
                    continue;
                }
                let delta = Point::new(pos[i].x - pos[j].x, pos[i].y - pos[j].y);
                let distance = delta.norm().max(MIN_DISTANCE);
                let attraction = if adjacent.contains(&undirected(i, j)) { distance / k } else { 0.0 };
                let force = k * k / (distance * distance) - attraction;
                disp.x += delta.x * force;
                disp.y += delta.y * force;
            }

            let length = disp.norm().max(MIN_DISTANCE);
            let step = Point::new(disp.x * temperature / length, disp.y * temperature / length);
            next[i].x += step.x;
            next[i].y += step.y;
            moved += step.norm();
        }

        pos = next;
        temperature -= cooling;
        if moved / (n as f64) < CONVERGENCE_THRESHOLD {
            break;
        }
    }

    rescale(&mut pos);
    pos
}

/// Largest side of the bounding box.
fn extent(pos: &[Point]) -> f64 {
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in pos {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    (max_x - min_x).max(max_y - min_y)
}

/// Center on the origin and scale so the farthest coordinate is at 1.
fn rescale(pos: &mut [Point]) {
    let n = pos.len() as f64;
    let cx = pos.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = pos.iter().map(|p| p.y).sum::<f64>() / n;

    let mut limit: f64 = 0.0;
    for p in pos.iter_mut() {
        p.x -= cx;
        p.y -= cy;
        limit = limit.max(p.x.abs()).max(p.y.abs());
    }
    if limit > 0.0 {
        for p in pos.iter_mut() {
            p.x /= limit;
            p.y /= limit;
        }
    }
}
