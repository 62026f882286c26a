// src/bench/sweep.rs
//! Simple graph vs multigraph sweep.
//!
//! For each node count, every connection count from
//! [`connection_counts`](crate::graph::connection_counts) is paired with every
//! family and strategy; each configuration averages a fresh connected graph
//! per run. Small configurations also keep their first graph for preview.

use crate::error::{CoverlabError, Result};
use crate::graph::{connection_counts, generate_connected, FamilySpec, Graph, GraphFamily};
use crate::rng;
use crate::walk::Strategy;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Loaded from `[sweep]` in `coverlab.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub node_counts: Vec<usize>,
    pub families: Vec<GraphFamily>,
    pub strategies: Vec<Strategy>,
    pub runs: usize,
    /// Draws allowed per graph for families that can come out disconnected.
    pub max_attempts: usize,
    /// Largest node count that still gets a preview graph.
    pub preview_max: usize,
    pub seed: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            node_counts: vec![5, 10, 15, 20],
            families: vec![GraphFamily::Simple, GraphFamily::Multigraph],
            strategies: vec![Strategy::Random, Strategy::NonBacktracking],
            runs: 10,
            max_attempts: 100,
            preview_max: 12,
            seed: 0,
        }
    }
}

/// One line of the sweep table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    pub nodes: usize,
    pub connections: usize,
    pub family: GraphFamily,
    pub strategy: Strategy,
    pub runs: usize,
    pub average: f64,
}

/// First graph drawn for one (nodes, connections, family) configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPreview {
    pub nodes: usize,
    pub connections: usize,
    pub family: GraphFamily,
    pub graph: Graph,
}

impl SweepPreview {
    #[must_use]
    pub fn title(&self) -> String {
        format!(
            "Type: {}, N={}, C={}",
            self.family, self.nodes, self.connections
        )
    }

    #[must_use]
    pub fn file_name(&self) -> String {
        format!(
            "preview_{}_n{}_c{}.svg",
            self.family.slug(),
            self.nodes,
            self.connections
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub rows: Vec<SweepRow>,
    pub previews: Vec<SweepPreview>,
}

/// Runs the sweep. Rows come back grouped by (nodes, connections) in
/// ascending order, then by family and strategy in config order. Previews
/// follow the same order, one per family, for node counts up to
/// `preview_max`.
///
/// # Errors
/// `InvalidParameter` for zero runs or a zero node count;
/// `GenerationExhausted` when a family never yields a connected graph.
pub fn run_sweep(config: &SweepConfig) -> Result<SweepReport> {
    if config.runs == 0 {
        return Err(CoverlabError::invalid("sweep needs at least one run per configuration"));
    }
    if config.node_counts.contains(&0) {
        return Err(CoverlabError::invalid("sweep node counts must be positive"));
    }

    let cells: Vec<(usize, usize)> = config
        .node_counts
        .iter()
        .flat_map(|&n| connection_counts(n).into_iter().map(move |c| (n, c)))
        .collect();

    let groups = cells
        .par_iter()
        .map(|&(n, c)| sweep_cell(config, n, c))
        .collect::<Result<Vec<_>>>()?;

    let mut report = SweepReport {
        rows: Vec::new(),
        previews: Vec::new(),
    };
    for (rows, previews) in groups {
        report.rows.extend(rows);
        report.previews.extend(previews);
    }
    Ok(report)
}

fn sweep_cell(
    config: &SweepConfig,
    nodes: usize,
    connections: usize,
) -> Result<(Vec<SweepRow>, Vec<SweepPreview>)> {
    let mut rng = rng::seeded(config.seed, &[nodes as u64, connections as u64]);
    let mut rows = Vec::with_capacity(config.families.len() * config.strategies.len());
    let mut previews = Vec::new();

    for &family in &config.families {
        let spec = FamilySpec::new(family, nodes, connections);
        for (i, &strategy) in config.strategies.iter().enumerate() {
            let (average, first) =
                sample_cover_times(&spec, strategy, config.runs, config.max_attempts, &mut rng)?;
            if i == 0 && nodes <= config.preview_max {
                previews.push(SweepPreview {
                    nodes,
                    connections,
                    family,
                    graph: first,
                });
            }
            rows.push(SweepRow {
                nodes,
                connections,
                family,
                strategy,
                runs: config.runs,
                average,
            });
        }
    }
    Ok((rows, previews))
}

/// Mean cover time over `runs` freshly generated connected graphs.
///
/// # Errors
/// `InvalidParameter` for zero runs; generator errors and
/// `GenerationExhausted` are propagated.
pub fn average_cover_time<R: Rng + ?Sized>(
    spec: &FamilySpec,
    strategy: Strategy,
    runs: usize,
    max_attempts: usize,
    rng: &mut R,
) -> Result<f64> {
    sample_cover_times(spec, strategy, runs, max_attempts, rng).map(|(average, _)| average)
}

/// Mean cover time plus the graph drawn on the first run.
#[allow(clippy::cast_precision_loss)]
fn sample_cover_times<R: Rng + ?Sized>(
    spec: &FamilySpec,
    strategy: Strategy,
    runs: usize,
    max_attempts: usize,
    rng: &mut R,
) -> Result<(f64, Graph)> {
    if runs == 0 {
        return Err(CoverlabError::invalid("need at least one run to average"));
    }
    let mut total = 0usize;
    let mut first = None;
    for _ in 0..runs {
        let graph = generate_connected(spec, max_attempts, rng)?;
        total += strategy.cover_time(&graph, rng)?;
        if first.is_none() {
            first = Some(graph);
        }
    }
    let first = first.ok_or_else(|| CoverlabError::invalid("need at least one run to average"))?;
    Ok((total as f64 / runs as f64, first))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_follow_connection_counts() {
        let config = SweepConfig {
            node_counts: vec![5],
            runs: 3,
            seed: 9,
            ..SweepConfig::default()
        };
        let rows = run_sweep(&config).unwrap().rows;
        // connection_counts(5) = [4, 8, 10, 15]
        assert_eq!(rows.len(), 4 * 2 * 2);
        assert_eq!(rows[0].connections, 4);
        assert_eq!(rows[0].family, GraphFamily::Simple);
        assert_eq!(rows[1].strategy, Strategy::NonBacktracking);
        assert!(rows.iter().all(|r| r.average >= 4.0 && r.runs == 3));
    }

    #[test]
    fn previews_only_for_small_node_counts() {
        let config = SweepConfig {
            node_counts: vec![5, 14],
            runs: 2,
            seed: 4,
            ..SweepConfig::default()
        };
        let report = run_sweep(&config).unwrap();
        // one per family for each of connection_counts(5) = [4, 8, 10, 15]
        assert_eq!(report.previews.len(), 4 * 2);
        assert!(report.previews.iter().all(|p| p.nodes == 5));
        for p in &report.previews {
            assert_eq!(p.graph.node_count(), 5);
            // simple graphs stop at the complete graph's 10 edges
            let cap = if p.family == GraphFamily::Simple { 10 } else { p.connections };
            assert_eq!(p.graph.edge_count(), p.connections.min(cap));
            assert!(p.graph.is_connected());
        }
        assert_eq!(report.previews[0].family, GraphFamily::Simple);
        assert_eq!(report.previews[1].family, GraphFamily::Multigraph);
        assert_eq!(report.previews[1].file_name(), "preview_multigraph_n5_c4.svg");
        assert_eq!(report.previews[0].title(), "Type: Simple, N=5, C=4");

        let none = SweepConfig {
            preview_max: 0,
            ..config
        };
        assert!(run_sweep(&none).unwrap().previews.is_empty());
    }

    #[test]
    fn zero_runs_is_rejected() {
        let config = SweepConfig {
            runs: 0,
            ..SweepConfig::default()
        };
        assert!(matches!(
            run_sweep(&config),
            Err(CoverlabError::InvalidParameter(_))
        ));
    }
}
