// src/walk/mod.rs
//! Graph traversal strategies and cover-time measurement.
//!
//! Every strategy starts on a uniformly random node and runs until each node
//! has been visited at least once. The number of moves taken is the walk's
//! cover time. The same loop drives both [`Strategy::cover_time`] and
//! [`Strategy::trace`]; only the observer differs.

pub mod trace;

pub use trace::{Frame, WalkTrace};

use crate::error::{CoverlabError, Result};
use crate::graph::Graph;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Uniformly random neighbor every step.
    Random,
    /// Prefer unvisited neighbors, otherwise any neighbor.
    Explore,
    /// Depth-first: push an unvisited neighbor or backtrack.
    Dfs,
    /// Random, but never straight back to the previous node when avoidable.
    NonBacktracking,
}

impl Strategy {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Random => "Random Walk",
            Self::Explore => "Explore Walk",
            Self::Dfs => "DFS Walk",
            Self::NonBacktracking => "Non-Backtracking",
        }
    }

    /// Steps needed to visit every node.
    ///
    /// # Errors
    /// `EmptyGraph` for a graph without nodes, `Disconnected` when some node
    /// is unreachable.
    pub fn cover_time<R: Rng + ?Sized>(self, graph: &Graph, rng: &mut R) -> Result<usize> {
        let mut counter = StepCounter::default();
        self.run(graph, rng, &mut counter)?;
        Ok(counter.steps)
    }

    /// Records every step of a walk.
    ///
    /// # Errors
    /// Same as [`Strategy::cover_time`].
    pub fn trace<R: Rng + ?Sized>(self, graph: &Graph, rng: &mut R) -> Result<WalkTrace> {
        let mut trace = WalkTrace::default();
        self.run(graph, rng, &mut trace)?;
        Ok(trace)
    }

    fn run<R, O>(self, graph: &Graph, rng: &mut R, observer: &mut O) -> Result<()>
    where
        R: Rng + ?Sized,
        O: Observer,
    {
        let n = graph.node_count();
        if n == 0 {
            return Err(CoverlabError::EmptyGraph);
        }
        if !graph.is_connected() {
            return Err(CoverlabError::Disconnected);
        }

        let start = rng.gen_range(0..n);
        let mut visited = Visited::new(n);
        visited.insert(start);
        observer.start(start);

        match self {
            Self::Random => random_walk(graph, rng, start, &mut visited, observer),
            Self::Explore => explore_walk(graph, rng, start, &mut visited, observer),
            Self::Dfs => dfs_walk(graph, rng, start, &mut visited, observer),
            Self::NonBacktracking => non_backtracking_walk(graph, rng, start, &mut visited, observer),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

trait Observer {
    fn start(&mut self, node: usize);
    fn step(&mut self, node: usize, discovered: bool);
}

#[derive(Default)]
struct StepCounter {
    steps: usize,
}

impl Observer for StepCounter {
    fn start(&mut self, _node: usize) {}

    fn step(&mut self, _node: usize, _discovered: bool) {
        self.steps += 1;
    }
}

impl Observer for WalkTrace {
    fn start(&mut self, node: usize) {
        WalkTrace::start(self, node);
    }

    fn step(&mut self, node: usize, discovered: bool) {
        self.record(node, discovered);
    }
}

struct Visited {
    seen: Vec<bool>,
    count: usize,
}

impl Visited {
    fn new(n: usize) -> Self {
        Self {
            seen: vec![false; n],
            count: 0,
        }
    }

    fn contains(&self, node: usize) -> bool {
        self.seen[node]
    }

    /// Returns true if the node was newly discovered.
    fn insert(&mut self, node: usize) -> bool {
        if self.seen[node] {
            return false;
        }
        self.seen[node] = true;
        self.count += 1;
        true
    }

    fn complete(&self) -> bool {
        self.count == self.seen.len()
    }

    fn unvisited_among(&self, candidates: &[usize]) -> Vec<usize> {
        candidates.iter().copied().filter(|&n| !self.contains(n)).collect()
    }
}

// In a connected graph with more than one node every node has a neighbor and
// the DFS stack cannot drain before coverage, so the `Disconnected` fallbacks
// below are unreachable after the connectivity check in `run`.

fn pick<R: Rng + ?Sized>(candidates: &[usize], rng: &mut R) -> Result<usize> {
    candidates.choose(rng).copied().ok_or(CoverlabError::Disconnected)
}

fn random_walk<R: Rng + ?Sized, O: Observer>(
    graph: &Graph,
    rng: &mut R,
    start: usize,
    visited: &mut Visited,
    observer: &mut O,
) -> Result<()> {
    let mut current = start;
    while !visited.complete() {
        current = pick(graph.neighbors(current), rng)?;
        let discovered = visited.insert(current);
        observer.step(current, discovered);
    }
    Ok(())
}

fn explore_walk<R: Rng + ?Sized, O: Observer>(
    graph: &Graph,
    rng: &mut R,
    start: usize,
    visited: &mut Visited,
    observer: &mut O,
) -> Result<()> {
    let mut current = start;
    while !visited.complete() {
        let neighbors = graph.neighbors(current);
        let fresh = visited.unvisited_among(neighbors);
        current = if fresh.is_empty() {
            pick(neighbors, rng)?
        } else {
            pick(&fresh, rng)?
        };
        let discovered = visited.insert(current);
        observer.step(current, discovered);
    }
    Ok(())
}

fn dfs_walk<R: Rng + ?Sized, O: Observer>(
    graph: &Graph,
    rng: &mut R,
    start: usize,
    visited: &mut Visited,
    observer: &mut O,
) -> Result<()> {
    let mut stack = vec![start];
    while !visited.complete() {
        let top = *stack.last().ok_or(CoverlabError::Disconnected)?;
        let fresh = visited.unvisited_among(graph.neighbors(top));
        if fresh.is_empty() {
            stack.pop();
            let back = *stack.last().ok_or(CoverlabError::Disconnected)?;
            observer.step(back, false);
        } else {
            let next = pick(&fresh, rng)?;
            visited.insert(next);
            stack.push(next);
            observer.step(next, true);
        }
    }
    Ok(())
}

fn non_backtracking_walk<R: Rng + ?Sized, O: Observer>(
    graph: &Graph,
    rng: &mut R,
    start: usize,
    visited: &mut Visited,
    observer: &mut O,
) -> Result<()> {
    let mut current = start;
    let mut previous: Option<usize> = None;
    let mut candidates = Vec::new();
    while !visited.complete() {
        candidates.clear();
        candidates.extend_from_slice(graph.neighbors(current));
        if let Some(prev) = previous {
            if candidates.len() > 1 {
                if let Some(pos) = candidates.iter().position(|&n| n == prev) {
                    candidates.remove(pos);
                }
            }
        }
        previous = Some(current);
        current = pick(&candidates, rng)?;
        let discovered = visited.insert(current);
        observer.step(current, discovered);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn path(n: usize) -> Graph {
        let mut g = Graph::new(n);
        for i in 1..n {
            g.add_edge(i - 1, i);
        }
        g
    }

    #[test]
    fn dfs_on_path_from_end_is_linear() {
        // From either end of a path DFS never backtracks; from the middle it
        // walks one side, unwinds it, then walks the other.
        let g = path(5);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let t = Strategy::Dfs.trace(&g, &mut rng).unwrap();
            let start = t.frames()[0].node;
            let first_side = if t.frames()[1].node > start { 4 - start } else { start };
            let expected = if start == 0 || start == 4 { 4 } else { 4 + first_side };
            assert_eq!(t.steps(), expected);
        }
    }

    #[test]
    fn dfs_pop_lands_on_new_stack_top() {
        let mut star = Graph::new(6);
        for leaf in 1..6 {
            star.add_edge(0, leaf);
        }
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let t = Strategy::Dfs.trace(&star, &mut rng).unwrap();
            for pair in t.frames().windows(2) {
                // Centre and leaves alternate; every backtrack returns to the centre.
                assert_ne!(pair[0].node == 0, pair[1].node == 0);
                if pair[1].visited == pair[0].visited {
                    assert_eq!(pair[1].node, 0);
                }
            }
        }
    }

    #[test]
    fn non_backtracking_drops_one_parallel_entry() {
        // 0 =(double edge)= 1 -- 2
        let mut g = Graph::new(3);
        g.add_edge(0, 1);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        let mut returned = false;
        for seed in 0..200 {
            let t = Strategy::NonBacktracking
                .trace(&g, &mut StdRng::seed_from_u64(seed))
                .unwrap();
            returned |= t
                .frames()
                .windows(3)
                .any(|w| w[0].node == 0 && w[1].node == 1 && w[2].node == 0);
        }
        assert!(returned);
    }

    #[test]
    fn explore_on_complete_graph_is_n_minus_one() {
        let g = Graph::complete(7);
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(Strategy::Explore.cover_time(&g, &mut rng).unwrap(), 6);
    }

    #[test]
    fn single_node_takes_zero_steps() {
        let g = Graph::new(1);
        let mut rng = StdRng::seed_from_u64(0);
        for s in [Strategy::Random, Strategy::Explore, Strategy::Dfs, Strategy::NonBacktracking] {
            assert_eq!(s.cover_time(&g, &mut rng).unwrap(), 0);
        }
    }

    #[test]
    fn non_backtracking_on_cycle_goes_straight_round() {
        let mut g = path(6);
        g.add_edge(5, 0);
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(Strategy::NonBacktracking.cover_time(&g, &mut rng).unwrap(), 5);
    }

    #[test]
    fn rejects_bad_graphs() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            Strategy::Random.cover_time(&Graph::new(0), &mut rng),
            Err(CoverlabError::EmptyGraph)
        ));
        assert!(matches!(
            Strategy::Dfs.cover_time(&Graph::new(3), &mut rng),
            Err(CoverlabError::Disconnected)
        ));
    }

    #[test]
    fn trace_frames_match_cover_time() {
        let g = Graph::complete(5);
        let a = Strategy::Random.trace(&g, &mut StdRng::seed_from_u64(8)).unwrap();
        let b = Strategy::Random.cover_time(&g, &mut StdRng::seed_from_u64(8)).unwrap();
        assert_eq!(a.steps(), b);
        assert_eq!(a.discovery_order().len(), 5);
    }
}
