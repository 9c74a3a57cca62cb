//! Weighted Fruchterman-Reingold spring layout with pinned nodes
//!
//! Nodes repel each other with `k² / d` and edges attract with `w · d² / k`,
//! where `k = sqrt(1 / n)`. Movement per step is capped by a temperature that
//! cools linearly to zero over the iteration budget. Pinned nodes take part
//! in the force computation but never move.

use crate::diagram_generation::domain::{Point, Positions};
use log::{debug, trace, warn};
use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Minimum pairwise distance used in force computation
const MIN_DISTANCE: f64 = 0.01;

/// Mean per-node displacement below which the simulation stops early
const CONVERGENCE_THRESHOLD: f64 = 1e-4;

/// Spring layout configuration
#[derive(Debug, Clone)]
pub struct SpringLayout {
    iterations: usize,
    seed: u64,
}

impl SpringLayout {
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            seed: 0,
        }
    }

    /// Seed for the random placement of nodes without an initial position
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Lays out `graph`, whose node weights are node ids.
    ///
    /// Every node present in `pinned` keeps exactly that position. Other nodes
    /// start at random positions inside the square spanned by the pinned
    /// coordinates. A degenerate simulation yields every free node at the origin.
    pub fn run(&self, graph: &UnGraph<String, f64>, pinned: &Positions) -> Positions {
        let node_count = graph.node_count();
        let ids: Vec<&String> = graph.node_weights().collect();
        let fixed: Vec<bool> = ids.iter().map(|id| pinned.contains_key(*id)).collect();

        if node_count == 0 {
            return Positions::new();
        }
        if node_count == 1 || fixed.iter().all(|&f| f) {
            return Self::collect(&ids, |i| pinned.get(ids[i]).copied().unwrap_or_default());
        }

        let mut positions = self.initial_positions(&ids, pinned);
        let adjacency = Self::adjacency(graph);
        let k = (1.0 / node_count as f64).sqrt();

        let (min, max) = bounds(&positions);
        let mut temperature = (max.x - min.x).max(max.y - min.y) * 0.1;
        let cooling = temperature / (self.iterations as f64 + 1.0);

        let mut iterations_run = 0;
        for _ in 0..self.iterations {
            iterations_run += 1;
            let mut error = 0.0;
            let mut delta_positions = vec![Point::origin(); node_count];

            for i in 0..node_count {
                if fixed[i] {
                    continue;
                }
                let mut displacement = Point::origin();
                for j in 0..node_count {
                    if i == j {
                        continue;
                    }
                    let dx = positions[i].x - positions[j].x;
                    let dy = positions[i].y - positions[j].y;
                    let distance = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                    let force = k * k / (distance * distance)
                        - adjacency[i * node_count + j] * distance / k;
                    displacement.x += dx * force;
                    displacement.y += dy * force;
                }

                let mut length =
                    (displacement.x * displacement.x + displacement.y * displacement.y).sqrt();
                if length < MIN_DISTANCE {
                    length = 0.1;
                }
                let step = Point::new(
                    displacement.x * temperature / length,
                    displacement.y * temperature / length,
                );
                error += step.x * step.x + step.y * step.y;
                delta_positions[i] = step;
            }

            for (position, delta) in positions.iter_mut().zip(&delta_positions) {
                position.x += delta.x;
                position.y += delta.y;
            }

            temperature -= cooling;
            if error.sqrt() / (node_count as f64) < CONVERGENCE_THRESHOLD {
                break;
            }
        }

        debug!(
            nodes = node_count,
            edges = graph.edge_count(),
            iterations = iterations_run;
            "Spring layout finished"
        );

        if positions.iter().any(|p| !p.is_finite()) {
            warn!("Spring layout diverged, placing free nodes at the origin");
            return Self::collect(&ids, |i| pinned.get(ids[i]).copied().unwrap_or_default());
        }

        Self::collect(&ids, |i| positions[i])
    }

    fn initial_positions(&self, ids: &[&String], pinned: &Positions) -> Vec<Point> {
        let mut rng = StdRng::seed_from_u64(self.seed);

        let domain_size = pinned
            .values()
            .flat_map(|p| [p.x.abs(), p.y.abs()])
            .fold(0.0_f64, f64::max);
        let domain_size = if domain_size > 0.0 { domain_size } else { 1.0 };

        ids.iter()
            .map(|id| match pinned.get(*id) {
                Some(point) => *point,
                None => Point::new(
                    rng.random::<f64>() * domain_size,
                    rng.random::<f64>() * domain_size,
                ),
            })
            .collect()
    }

    /// Dense symmetric weight matrix in row-major order
    fn adjacency(graph: &UnGraph<String, f64>) -> Vec<f64> {
        let n = graph.node_count();
        let mut matrix = vec![0.0; n * n];
        for edge in graph.edge_references() {
            let (a, b) = (edge.source().index(), edge.target().index());
            if a == b {
                continue;
            }
            matrix[a * n + b] = *edge.weight();
            matrix[b * n + a] = *edge.weight();
        }
        matrix
    }

    fn collect(ids: &[&String], position_of: impl Fn(usize) -> Point) -> Positions {
        let positions: Positions = ids
            .iter()
            .enumerate()
            .map(|(i, id)| ((*id).clone(), position_of(i)))
            .collect();
        trace!(positions:? = positions; "Layout positions");
        positions
    }
}

fn bounds(points: &[Point]) -> (Point, Point) {
    points.iter().fold(
        (
            Point::new(f64::INFINITY, f64::INFINITY),
            Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        ),
        |(min, max), p| {
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        },
    )
}
