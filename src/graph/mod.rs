// src/graph/mod.rs
//! Undirected graphs over the node set `0..n`.
//!
//! A [`Graph`] keeps both an edge list (for drawing and rewiring) and
//! per-node neighbor lists (for walking). Simple-graph generators go through
//! [`Graph::add_simple_edge`]; multigraph generators use [`Graph::add_edge`],
//! which accepts self-loops and parallel edges.

pub mod generate;
pub mod layout;

pub use generate::{
    barabasi_albert, connected_multigraph, connected_simple, connection_counts,
    generate_connected, gnm_random, max_simple_edges, watts_strogatz, FamilySpec,
};
pub use layout::{spring_layout, Position};

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Graph families the experiments draw from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum GraphFamily {
    /// Erdős–Rényi G(n, m).
    Random,
    /// Watts–Strogatz ring lattice with random rewiring.
    SmallWorld,
    /// Barabási–Albert preferential attachment.
    ScaleFree,
    /// Connected simple graph grown from a random spanning tree.
    Simple,
    /// Connected multigraph grown from a random spanning tree.
    Multigraph,
}

impl GraphFamily {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Random => "Random Graph",
            Self::SmallWorld => "Small World",
            Self::ScaleFree => "Scale Free",
            Self::Simple => "Simple",
            Self::Multigraph => "Multigraph",
        }
    }

    /// Lowercase name used in file names; matches the config spelling.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::SmallWorld => "small_world",
            Self::ScaleFree => "scale_free",
            Self::Simple => "simple",
            Self::Multigraph => "multigraph",
        }
    }
}

impl fmt::Display for GraphFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    adjacency: Vec<Vec<usize>>,
    edges: Vec<(usize, usize)>,
}

impl Graph {
    /// Creates a graph with `nodes` isolated nodes.
    #[must_use]
    pub fn new(nodes: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); nodes],
            edges: Vec::new(),
        }
    }

    /// Creates the complete simple graph on `nodes` nodes.
    #[must_use]
    pub fn complete(nodes: usize) -> Self {
        let mut graph = Self::new(nodes);
        for u in 0..nodes {
            for v in (u + 1)..nodes {
                graph.add_edge(u, v);
            }
        }
        graph
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Neighbor entries of `node`. Parallel edges repeat a neighbor; a
    /// self-loop lists the node once.
    ///
    /// # Panics
    /// Panics if `node` is out of range.
    #[must_use]
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }

    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        self.adjacency.get(node).map_or(0, Vec::len)
    }

    #[must_use]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adjacency.get(u).is_some_and(|n| n.contains(&v))
    }

    /// Adds an edge unconditionally (multigraph semantics).
    ///
    /// # Panics
    /// Panics if either endpoint is out of range.
    pub fn add_edge(&mut self, u: usize, v: usize) {
        self.adjacency[u].push(v);
        if u != v {
            self.adjacency[v].push(u);
        }
        self.edges.push((u, v));
    }

    /// Adds an edge unless it is a self-loop or already present.
    /// Returns whether the edge was added.
    pub fn add_simple_edge(&mut self, u: usize, v: usize) -> bool {
        if u == v || self.has_edge(u, v) {
            return false;
        }
        self.add_edge(u, v);
        true
    }

    /// Removes one `u`–`v` edge. Returns whether an edge was removed.
    pub fn remove_edge(&mut self, u: usize, v: usize) -> bool {
        let Some(idx) = self
            .edges
            .iter()
            .position(|&(a, b)| (a == u && b == v) || (a == v && b == u))
        else {
            return false;
        };
        self.edges.swap_remove(idx);
        remove_one(&mut self.adjacency[u], v);
        if u != v {
            remove_one(&mut self.adjacency[v], u);
        }
        true
    }

    /// Breadth-first reachability from node 0. The empty graph is not
    /// connected; a single node is.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        let n = self.node_count();
        if n == 0 {
            return false;
        }
        let mut seen = vec![false; n];
        let mut queue = VecDeque::from([0]);
        seen[0] = true;
        let mut reached = 1;

        while let Some(v) = queue.pop_front() {
            for &u in &self.adjacency[v] {
                if !seen[u] {
                    seen[u] = true;
                    reached += 1;
                    queue.push_back(u);
                }
            }
        }
        reached == n
    }
}

fn remove_one(list: &mut Vec<usize>, value: usize) {
    if let Some(pos) = list.iter().position(|&x| x == value) {
        list.remove(pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_is_connected() {
        let mut g = Graph::new(3);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        assert!(g.is_connected());
        assert_eq!(g.neighbors(1), &[0, 2]);
    }

    #[test]
    fn isolated_node_breaks_connectivity() {
        let mut g = Graph::new(3);
        g.add_edge(0, 1);
        assert!(!g.is_connected());
    }

    #[test]
    fn empty_and_singleton() {
        assert!(!Graph::new(0).is_connected());
        assert!(Graph::new(1).is_connected());
    }

    #[test]
    fn self_loop_listed_once() {
        let mut g = Graph::new(2);
        g.add_edge(0, 0);
        g.add_edge(0, 1);
        assert_eq!(g.neighbors(0), &[0, 1]);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn simple_edge_rejects_duplicates_and_loops() {
        let mut g = Graph::new(2);
        assert!(g.add_simple_edge(0, 1));
        assert!(!g.add_simple_edge(1, 0));
        assert!(!g.add_simple_edge(1, 1));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn remove_edge_either_orientation() {
        let mut g = Graph::complete(3);
        assert!(g.remove_edge(2, 0));
        assert!(!g.has_edge(0, 2));
        assert!(!g.remove_edge(0, 2));
        assert_eq!(g.edge_count(), 2);
    }
}
