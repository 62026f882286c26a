// src/graph/layout.rs
//! Force-directed (Fruchterman–Reingold) node placement.

use super::Graph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ITERATIONS: usize = 50;
const THRESHOLD: f64 = 1e-4;
const MIN_DISTANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Spring layout rescaled into `[-1, 1]²`. Deterministic for a given seed.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn spring_layout(graph: &Graph, iterations: usize, seed: u64) -> Vec<Position> {
    let n = graph.node_count();
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![Position::default()];
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos: Vec<Position> = (0..n)
        .map(|_| Position {
            x: rng.gen(),
            y: rng.gen(),
        })
        .collect();
    let weights = edge_weights(graph);

    let k = (1.0 / n as f64).sqrt();
    let mut temperature = 0.1 * span(&pos);
    let cooling = temperature / (iterations as f64 + 1.0);

    for _ in 0..iterations {
        let moved = step(&mut pos, &weights, k, temperature);
        temperature -= cooling;
        if moved / (n as f64) < THRESHOLD {
            break;
        }
    }

    rescale(&mut pos);
    pos
}

/// Dense edge-multiplicity matrix, ignoring self-loops.
fn edge_weights(graph: &Graph) -> Vec<Vec<f64>> {
    let n = graph.node_count();
    let mut weights = vec![vec![0.0; n]; n];
    for &(u, v) in graph.edges() {
        if u != v {
            weights[u][v] += 1.0;
            weights[v][u] += 1.0;
        }
    }
    weights
}

fn span(pos: &[Position]) -> f64 {
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

/// One cooling step. Returns the total displacement applied.
fn step(pos: &mut [Position], weights: &[Vec<f64>], k: f64, temperature: f64) -> f64 {
    let n = pos.len();
    let mut shifts = vec![Position::default(); n];

    for i in 0..n {
        let mut disp = Position::default();
        for j in 0..n {
            if i == j {
                continue;
            }
            let dx = pos[i].x - pos[j].x;
            let dy = pos[i].y - pos[j].y;
            let dist = dx.hypot(dy).max(MIN_DISTANCE);
            let force = k * k / (dist * dist) - weights[i][j] * dist / k;
            disp.x += dx * force;
            disp.y += dy * force;
        }
        let mut len = disp.x.hypot(disp.y);
        if len < MIN_DISTANCE {
            len = 0.1;
        }
        shifts[i] = Position {
            x: disp.x * temperature / len,
            y: disp.y * temperature / len,
        };
    }

    let mut moved = 0.0;
    for (p, s) in pos.iter_mut().zip(&shifts) {
        p.x += s.x;
        p.y += s.y;
        moved += s.x.hypot(s.y);
    }
    moved
}

/// Centers on the mean and scales so the largest coordinate magnitude is 1.
#[allow(clippy::cast_precision_loss)]
fn rescale(pos: &mut [Position]) {
    let n = pos.len() as f64;
    let mean_x = pos.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = pos.iter().map(|p| p.y).sum::<f64>() / n;
    let mut limit: f64 = 0.0;
    for p in pos.iter_mut() {
        p.x -= mean_x;
        p.y -= mean_y;
        limit = limit.max(p.x.abs()).max(p.y.abs());
    }
    if limit > 0.0 {
        for p in pos.iter_mut() {
            p.x /= limit;
            p.y /= limit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_bounded_and_deterministic() {
        let g = Graph::complete(6);
        let a = spring_layout(&g, DEFAULT_ITERATIONS, 42);
        let b = spring_layout(&g, DEFAULT_ITERATIONS, 42);
        assert_eq!(a, b);
        assert_eq!(a.len(), 6);
        for p in &a {
            assert!(p.x.abs() <= 1.0 + 1e-9 && p.y.abs() <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn trivial_graphs() {
        assert!(spring_layout(&Graph::new(0), 10, 1).is_empty());
        assert_eq!(spring_layout(&Graph::new(1), 10, 1), vec![Position::default()]);
    }
}
