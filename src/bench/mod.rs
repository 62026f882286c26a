// src/bench/mod.rs
//! Cover-time benchmarks.
//!
//! - [`run_bench`]: every (nodes, connections) cell, many trials, one graph
//!   per family per trial, every strategy on every connected graph.
//! - [`sweep::run_sweep`]: the connected simple vs multigraph comparison.
//! - `report`: console tables for both.
//!
//! # Example
//!
//! ```ignore
//! coverlab bench --trials 100
//! ```

pub mod report;
pub mod sweep;

pub use sweep::{average_cover_time, run_sweep, SweepConfig, SweepPreview, SweepReport, SweepRow};

use crate::error::Result;
use crate::graph::{max_simple_edges, FamilySpec, GraphFamily};
use crate::rng;
use crate::walk::Strategy;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Benchmark grid. Loaded from `[bench]` in `coverlab.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub node_counts: Vec<usize>,
    pub connection_counts: Vec<usize>,
    pub trials: usize,
    pub families: Vec<GraphFamily>,
    pub strategies: Vec<Strategy>,
    pub seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            node_counts: (10..=80).step_by(10).collect(),
            connection_counts: (40..=180).step_by(20).collect(),
            trials: 500,
            families: vec![
                GraphFamily::Random,
                GraphFamily::SmallWorld,
                GraphFamily::ScaleFree,
            ],
            strategies: vec![Strategy::Random, Strategy::Explore, Strategy::Dfs],
            seed: 0,
        }
    }
}

impl BenchConfig {
    /// Cells to run, in row-major (nodes, connections) order. Connection
    /// budgets above what a simple graph on `n` nodes can hold are skipped.
    #[must_use]
    pub fn cells(&self) -> Vec<(usize, usize)> {
        self.node_counts
            .iter()
            .flat_map(|&n| {
                self.connection_counts
                    .iter()
                    .filter(move |&&c| c <= max_simple_edges(n))
                    .map(move |&c| (n, c))
            })
            .collect()
    }
}

/// Mean cover time of one (family, strategy) pair in one cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellStats {
    pub nodes: usize,
    pub connections: usize,
    pub mean: f64,
    pub samples: usize,
}

/// All cells measured for one (family, strategy) pair, in cell order.
/// Cells where no connected graph was drawn are absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub family: GraphFamily,
    pub strategy: Strategy,
    pub cells: Vec<CellStats>,
}

impl Series {
    #[must_use]
    pub fn get(&self, nodes: usize, connections: usize) -> Option<&CellStats> {
        self.cells
            .iter()
            .find(|s| s.nodes == nodes && s.connections == connections)
    }

    #[must_use]
    pub fn title(&self) -> String {
        format!("{} - {}", self.family, self.strategy)
    }
}

/// Draws of one family in one cell that failed to produce a connected graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub family: GraphFamily,
    pub nodes: usize,
    pub connections: usize,
    pub count: usize,
}

/// Raw totals for one cell, passed to the progress callback.
#[derive(Debug, Clone, PartialEq)]
pub struct CellOutcome {
    pub nodes: usize,
    pub connections: usize,
    /// `(family, strategy, total steps, samples)`.
    pub totals: Vec<(GraphFamily, Strategy, usize, usize)>,
    /// `(family, rejected draws)`.
    pub rejected: Vec<(GraphFamily, usize)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchReport {
    pub node_counts: Vec<usize>,
    pub connection_counts: Vec<usize>,
    pub trials: usize,
    pub series: Vec<Series>,
    pub rejections: Vec<Rejection>,
}

impl BenchReport {
    #[must_use]
    pub fn series(&self, family: GraphFamily, strategy: Strategy) -> Option<&Series> {
        self.series
            .iter()
            .find(|s| s.family == family && s.strategy == strategy)
    }

    #[must_use]
    pub fn families(&self) -> Vec<GraphFamily> {
        let mut out: Vec<GraphFamily> = Vec::new();
        for s in &self.series {
            if !out.contains(&s.family) {
                out.push(s.family);
            }
        }
        out
    }

    #[must_use]
    pub fn strategies(&self) -> Vec<Strategy> {
        let mut out: Vec<Strategy> = Vec::new();
        for s in &self.series {
            if !out.contains(&s.strategy) {
                out.push(s.strategy);
            }
        }
        out
    }

    #[must_use]
    pub fn total_rejections(&self) -> usize {
        self.rejections.iter().map(|r| r.count).sum()
    }
}

/// Runs the benchmark grid. Cells run in parallel; `on_cell` is called as
/// each finishes.
///
/// # Errors
/// Only walk errors on graphs already checked to be connected, which do not
/// occur in practice. Generator failures count as rejections.
pub fn run_bench<F>(config: &BenchConfig, on_cell: F) -> Result<BenchReport>
where
    F: Fn(&CellOutcome) + Sync,
{
    let outcomes = config
        .cells()
        .par_iter()
        .map(|&(n, c)| {
            let outcome = run_cell(config, n, c)?;
            on_cell(&outcome);
            Ok(outcome)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(collect_report(config, &outcomes))
}

fn run_cell(config: &BenchConfig, nodes: usize, connections: usize) -> Result<CellOutcome> {
    let mut rng = rng::seeded(config.seed, &[nodes as u64, connections as u64]);
    let mut totals: Vec<(GraphFamily, Strategy, usize, usize)> = config
        .families
        .iter()
        .flat_map(|&f| config.strategies.iter().map(move |&s| (f, s, 0, 0)))
        .collect();
    let mut rejected: Vec<(GraphFamily, usize)> =
        config.families.iter().map(|&f| (f, 0)).collect();

    for _ in 0..config.trials {
        for (fi, &family) in config.families.iter().enumerate() {
            let graph = match FamilySpec::new(family, nodes, connections).build(&mut rng) {
                Ok(g) if g.is_connected() => g,
                _ => {
                    rejected[fi].1 += 1;
                    continue;
                }
            };
            for (si, strategy) in config.strategies.iter().enumerate() {
                let steps = strategy.cover_time(&graph, &mut rng)?;
                let slot = &mut totals[fi * config.strategies.len() + si];
                slot.2 += steps;
                slot.3 += 1;
            }
        }
    }

    Ok(CellOutcome {
        nodes,
        connections,
        totals,
        rejected,
    })
}

#[allow(clippy::cast_precision_loss)]
fn collect_report(config: &BenchConfig, outcomes: &[CellOutcome]) -> BenchReport {
    let mut series: Vec<Series> = config
        .families
        .iter()
        .flat_map(|&family| {
            config.strategies.iter().map(move |&strategy| Series {
                family,
                strategy,
                cells: Vec::new(),
            })
        })
        .collect();
    let mut rejections = Vec::new();

    for outcome in outcomes {
        for (slot, &(_, _, total, samples)) in series.iter_mut().zip(&outcome.totals) {
            if samples > 0 {
                slot.cells.push(CellStats {
                    nodes: outcome.nodes,
                    connections: outcome.connections,
                    mean: total as f64 / samples as f64,
                    samples,
                });
            }
        }
        for &(family, count) in &outcome.rejected {
            if count > 0 {
                rejections.push(Rejection {
                    family,
                    nodes: outcome.nodes,
                    connections: outcome.connections,
                    count,
                });
            }
        }
    }

    BenchReport {
        node_counts: config.node_counts.clone(),
        connection_counts: config.connection_counts.clone(),
        trials: config.trials,
        series,
        rejections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> BenchConfig {
        BenchConfig {
            node_counts: vec![5, 8],
            connection_counts: vec![8, 12],
            trials: 10,
            seed: 3,
            ..BenchConfig::default()
        }
    }

    #[test]
    fn dense_cells_are_skipped() {
        // 5 nodes hold at most 10 edges.
        assert_eq!(small().cells(), vec![(5, 8), (8, 8), (8, 12)]);
    }

    #[test]
    fn default_grid_matches_experiment() {
        let config = BenchConfig::default();
        assert_eq!(config.node_counts, vec![10, 20, 30, 40, 50, 60, 70, 80]);
        assert_eq!(config.connection_counts.first(), Some(&40));
        assert_eq!(config.connection_counts.last(), Some(&180));
        assert!(!config.cells().contains(&(10, 60)));
        assert!(config.cells().contains(&(10, 40)));
    }

    #[test]
    fn report_has_every_pair_and_sane_means() {
        let report = run_bench(&small(), |_| {}).unwrap();
        assert_eq!(report.series.len(), 9);
        for series in &report.series {
            for cell in &series.cells {
                assert!(cell.samples > 0 && cell.samples <= 10);
                assert!(cell.mean >= (cell.nodes - 1) as f64);
            }
        }
        let dfs = report
            .series(GraphFamily::Random, Strategy::Dfs)
            .unwrap();
        // A DFS walk pushes and pops each non-root node exactly once at most.
        for cell in &dfs.cells {
            assert!(cell.mean <= (2 * (cell.nodes - 1)) as f64);
        }
    }

    #[test]
    fn parallel_runs_are_reproducible() {
        let a = run_bench(&small(), |_| {}).unwrap();
        let b = run_bench(&small(), |_| {}).unwrap();
        assert_eq!(a, b);
    }
}
