// src/graph/generate.rs
//! Random graph generators.

use super::{Graph, GraphFamily};
use crate::error::{CoverlabError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Rewiring probability the small-world experiments use.
pub const DEFAULT_REWIRE_PROBABILITY: f64 = 0.1;

#[must_use]
pub fn max_simple_edges(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Uniform random simple graph with exactly `m` edges.
///
/// Asking for at least `n(n-1)/2` edges yields the complete graph.
pub fn gnm_random<R: Rng + ?Sized>(n: usize, m: usize, rng: &mut R) -> Graph {
    if m >= max_simple_edges(n) {
        return Graph::complete(n);
    }
    let mut graph = Graph::new(n);
    while graph.edge_count() < m {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        graph.add_simple_edge(u, v);
    }
    graph
}

/// Watts–Strogatz small-world graph.
///
/// # Errors
/// Returns `InvalidParameter` if `k > n` or `p` is not a probability.
pub fn watts_strogatz<R: Rng + ?Sized>(n: usize, k: usize, p: f64, rng: &mut R) -> Result<Graph> {
    if k > n {
        return Err(CoverlabError::invalid(format!(
            "small-world degree k={k} exceeds node count n={n}"
        )));
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(CoverlabError::invalid(format!(
            "rewiring probability {p} is outside [0, 1]"
        )));
    }
    if k == n {
        return Ok(Graph::complete(n));
    }

    let half = k / 2;
    let mut graph = Graph::new(n);
    for j in 1..=half {
        for u in 0..n {
            graph.add_simple_edge(u, (u + j) % n);
        }
    }

    for j in 1..=half {
        for u in 0..n {
            let v = (u + j) % n;
            if rng.gen::<f64>() >= p {
                continue;
            }
            // Every other node is already a neighbor: nothing to rewire to.
            if graph.degree(u) >= n - 1 {
                continue;
            }
            let mut w = rng.gen_range(0..n);
            while w == u || graph.has_edge(u, w) {
                w = rng.gen_range(0..n);
            }
            if graph.remove_edge(u, v) {
                graph.add_edge(u, w);
            }
        }
    }
    Ok(graph)
}

/// Barabási–Albert preferential-attachment graph.
///
/// # Errors
/// Returns `InvalidParameter` unless `1 <= m < n`.
pub fn barabasi_albert<R: Rng + ?Sized>(n: usize, m: usize, rng: &mut R) -> Result<Graph> {
    if m < 1 || m >= n {
        return Err(CoverlabError::invalid(format!(
            "scale-free attachment m={m} must satisfy 1 <= m < n={n}"
        )));
    }

    // Star on m + 1 nodes, centered on node 0.
    let mut graph = Graph::new(n);
    let mut repeated: Vec<usize> = Vec::with_capacity(2 * m * n);
    for leaf in 1..=m {
        graph.add_edge(0, leaf);
        repeated.push(leaf);
    }
    repeated.extend(std::iter::repeat(0).take(m));

    for source in (m + 1)..n {
        let targets = random_subset(&repeated, m, rng);
        for &t in &targets {
            graph.add_edge(source, t);
        }
        repeated.extend(targets);
        repeated.extend(std::iter::repeat(source).take(m));
    }
    Ok(graph)
}

/// Draws `m` distinct values from `pool` (sampling with replacement until
/// enough distinct values are collected).
fn random_subset<R: Rng + ?Sized>(pool: &[usize], m: usize, rng: &mut R) -> BTreeSet<usize> {
    let mut targets = BTreeSet::new();
    while targets.len() < m {
        if let Some(&x) = pool.choose(rng) {
            targets.insert(x);
        }
    }
    targets
}

/// Shuffled-order spanning tree: every node after the first links to a
/// uniformly chosen earlier node.
fn spanning_tree<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Graph {
    let mut graph = Graph::new(n);
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    for i in 1..n {
        let parent = order[rng.gen_range(0..i)];
        graph.add_edge(order[i], parent);
    }
    graph
}

/// Connected simple graph with `min(c, n(n-1)/2)` edges (at least the
/// `n - 1` tree edges).
pub fn connected_simple<R: Rng + ?Sized>(n: usize, c: usize, rng: &mut R) -> Graph {
    let mut graph = spanning_tree(n, rng);
    let target = c.min(max_simple_edges(n));
    while graph.edge_count() < target {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        graph.add_simple_edge(u, v);
    }
    graph
}

/// Connected multigraph with `c` edges (at least the `n - 1` tree edges).
/// Self-loops and parallel edges are allowed.
///
/// # Errors
/// Returns `InvalidParameter` when edges are requested on zero nodes.
pub fn connected_multigraph<R: Rng + ?Sized>(n: usize, c: usize, rng: &mut R) -> Result<Graph> {
    if n == 0 && c > 0 {
        return Err(CoverlabError::invalid("cannot place edges on an empty multigraph"));
    }
    let mut graph = spanning_tree(n, rng);
    while graph.edge_count() < c {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        graph.add_edge(u, v);
    }
    Ok(graph)
}

/// Connection counts to try for `n` nodes: `n - 1`, `1.5n`, `2n`, `3n`, and
/// the complete-graph count when it stays below `4n`.
#[must_use]
pub fn connection_counts(n: usize) -> Vec<usize> {
    let complete = max_simple_edges(n);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let one_and_half = (1.5 * n as f64).round() as usize;
    let mut set: BTreeSet<usize> =
        [n.saturating_sub(1), one_and_half, 2 * n, 3 * n].into_iter().collect();
    if complete < 4 * n {
        set.insert(complete);
    }
    set.into_iter().collect()
}

/// A graph family plus the node count and connection budget it is sized from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FamilySpec {
    pub family: GraphFamily,
    pub nodes: usize,
    pub connections: usize,
    pub rewire_probability: f64,
}

impl FamilySpec {
    #[must_use]
    pub fn new(family: GraphFamily, nodes: usize, connections: usize) -> Self {
        Self {
            family,
            nodes,
            connections,
            rewire_probability: DEFAULT_REWIRE_PROBABILITY,
        }
    }

    /// Small-world lattice degree derived from the connection budget.
    #[must_use]
    pub fn lattice_degree(&self) -> usize {
        (2 * self.connections).checked_div(self.nodes).unwrap_or(0)
    }

    /// Scale-free attachment count derived from the connection budget.
    #[must_use]
    pub fn attachment(&self) -> usize {
        self.connections.checked_div(self.nodes).unwrap_or(0).max(1)
    }

    /// Generates one graph. The result may be disconnected.
    ///
    /// # Errors
    /// Returns `InvalidParameter` when the derived generator parameters are
    /// impossible for this node count.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Graph> {
        let (n, c) = (self.nodes, self.connections);
        match self.family {
            GraphFamily::Random => Ok(gnm_random(n, c, rng)),
            GraphFamily::SmallWorld => {
                watts_strogatz(n, self.lattice_degree(), self.rewire_probability, rng)
            }
            GraphFamily::ScaleFree => barabasi_albert(n, self.attachment(), rng),
            GraphFamily::Simple => Ok(connected_simple(n, c, rng)),
            GraphFamily::Multigraph => connected_multigraph(n, c, rng),
        }
    }
}

/// Regenerates until the graph is connected.
///
/// # Errors
/// Parameter errors are returned immediately; `GenerationExhausted` after
/// `max_attempts` disconnected draws.
pub fn generate_connected<R: Rng + ?Sized>(
    spec: &FamilySpec,
    max_attempts: usize,
    rng: &mut R,
) -> Result<Graph> {
    for _ in 0..max_attempts {
        let graph = spec.build(rng)?;
        if graph.is_connected() {
            return Ok(graph);
        }
    }
    Err(CoverlabError::GenerationExhausted {
        family: spec.family,
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn gnm_has_exact_edge_count() {
        let mut rng = StdRng::seed_from_u64(1);
        let g = gnm_random(10, 20, &mut rng);
        assert_eq!(g.edge_count(), 20);
        for &(u, v) in g.edges() {
            assert_ne!(u, v);
        }
    }

    #[test]
    fn gnm_saturates_to_complete() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(gnm_random(5, 100, &mut rng).edge_count(), 10);
    }

    #[test]
    fn lattice_without_rewiring() {
        let mut rng = StdRng::seed_from_u64(3);
        let g = watts_strogatz(8, 4, 0.0, &mut rng).unwrap();
        assert_eq!(g.edge_count(), 16);
        assert!((0..8).all(|u| g.degree(u) == 4));
        assert!(g.has_edge(0, 7) && g.has_edge(0, 6));
    }

    #[test]
    fn rewiring_keeps_edge_count() {
        let mut rng = StdRng::seed_from_u64(9);
        let g = watts_strogatz(20, 4, 0.5, &mut rng).unwrap();
        assert_eq!(g.edge_count(), 40);
        for &(u, v) in g.edges() {
            assert_ne!(u, v);
        }
    }

    #[test]
    fn small_world_degree_checks() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(watts_strogatz(4, 5, 0.1, &mut rng).is_err());
        assert_eq!(watts_strogatz(4, 4, 0.1, &mut rng).unwrap().edge_count(), 6);
    }

    #[test]
    fn scale_free_edge_count() {
        let mut rng = StdRng::seed_from_u64(5);
        let g = barabasi_albert(30, 2, &mut rng).unwrap();
        // Star of m edges plus m per later node.
        assert_eq!(g.edge_count(), 2 + 2 * (30 - 3));
        assert!(g.is_connected());
    }

    #[test]
    fn scale_free_rejects_bad_m() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!(barabasi_albert(5, 0, &mut rng).is_err());
        assert!(barabasi_albert(5, 5, &mut rng).is_err());
    }

    #[test]
    fn connection_counts_matches_table() {
        assert_eq!(connection_counts(5), vec![4, 8, 10, 15]);
        assert_eq!(connection_counts(10), vec![9, 15, 20, 30]);
    }

    #[test]
    fn derived_parameters() {
        let spec = FamilySpec::new(GraphFamily::SmallWorld, 40, 60);
        assert_eq!(spec.lattice_degree(), 3);
        assert_eq!(spec.attachment(), 1);
    }
}
