// src/animate/mod.rs
//! Side-by-side traversal animation data.
//!
//! A [`Scene`] holds one connected graph and layout per family and one walk
//! trace per (strategy, family) panel. Drawing lives in `crate::tui`; the
//! scene itself is plain data and can be dumped as JSON.

use crate::error::{CoverlabError, Result};
use crate::graph::layout::DEFAULT_ITERATIONS;
use crate::graph::{generate_connected, spring_layout, FamilySpec, Graph, GraphFamily, Position};
use crate::rng;
use crate::walk::{Strategy, WalkTrace};
use serde::{Deserialize, Serialize};

/// Loaded from `[animate]` in `coverlab.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub nodes: usize,
    pub connections: usize,
    /// Panel columns.
    pub families: Vec<GraphFamily>,
    /// Panel rows.
    pub strategies: Vec<Strategy>,
    pub interval_ms: u64,
    pub layout_seed: u64,
    pub max_attempts: usize,
    pub seed: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            nodes: 40,
            connections: 60,
            families: vec![
                GraphFamily::Random,
                GraphFamily::SmallWorld,
                GraphFamily::ScaleFree,
            ],
            strategies: vec![Strategy::Explore, Strategy::Dfs],
            interval_ms: 25,
            layout_seed: 42,
            max_attempts: 1000,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneGraph {
    pub family: GraphFamily,
    pub graph: Graph,
    pub layout: Vec<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub strategy: Strategy,
    pub family: GraphFamily,
    /// Index into [`Scene::graphs`].
    pub graph: usize,
    pub trace: WalkTrace,
}

impl Panel {
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} - {}", self.family, self.strategy)
    }

    /// Walker position and visited nodes at `frame`; past the end of the
    /// trace the final state is held.
    #[must_use]
    pub fn state_at(&self, frame: usize) -> Option<(usize, &[usize])> {
        let f = self.trace.frame_or_last(frame)?;
        Some((f.node, self.trace.visited_at(frame)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub nodes: usize,
    pub connections: usize,
    pub rows: usize,
    pub cols: usize,
    pub graphs: Vec<SceneGraph>,
    /// Row-major: `panels[row * cols + col]`.
    pub panels: Vec<Panel>,
    pub frame_count: usize,
}

impl Scene {
    /// Generates the graphs, layouts and traces.
    ///
    /// # Errors
    /// `InvalidParameter` for an empty panel grid or no nodes,
    /// `GenerationExhausted` when a family never comes out connected.
    pub fn build(config: &AnimationConfig) -> Result<Self> {
        if config.families.is_empty() || config.strategies.is_empty() {
            return Err(CoverlabError::invalid(
                "animation needs at least one family and one strategy",
            ));
        }
        if config.nodes == 0 {
            return Err(CoverlabError::invalid("animation needs at least one node"));
        }

        let mut graph_rng = rng::seeded(config.seed, &[0]);
        let graphs = config
            .families
            .iter()
            .map(|&family| {
                let spec = FamilySpec::new(family, config.nodes, config.connections);
                let graph = generate_connected(&spec, config.max_attempts, &mut graph_rng)?;
                let layout = spring_layout(&graph, DEFAULT_ITERATIONS, config.layout_seed);
                Ok(SceneGraph {
                    family,
                    graph,
                    layout,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut panels = Vec::with_capacity(config.strategies.len() * graphs.len());
        for (row, &strategy) in config.strategies.iter().enumerate() {
            for (col, sg) in graphs.iter().enumerate() {
                let mut walk_rng = rng::seeded(config.seed, &[1, row as u64, col as u64]);
                panels.push(Panel {
                    strategy,
                    family: sg.family,
                    graph: col,
                    trace: strategy.trace(&sg.graph, &mut walk_rng)?,
                });
            }
        }

        let frame_count = panels.iter().map(|p| p.trace.len()).max().unwrap_or(0);
        Ok(Self {
            nodes: config.nodes,
            connections: config.connections,
            rows: config.strategies.len(),
            cols: graphs.len(),
            graphs,
            panels,
            frame_count,
        })
    }

    #[must_use]
    pub fn panel(&self, row: usize, col: usize) -> Option<&Panel> {
        if col >= self.cols {
            return None;
        }
        self.panels.get(row * self.cols + col)
    }

    #[must_use]
    pub fn graph_of(&self, panel: &Panel) -> Option<&SceneGraph> {
        self.graphs.get(panel.graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> AnimationConfig {
        AnimationConfig {
            nodes: 12,
            connections: 18,
            seed: 5,
            ..AnimationConfig::default()
        }
    }

    #[test]
    fn scene_has_grid_of_panels() {
        let scene = Scene::build(&small()).unwrap();
        assert_eq!((scene.rows, scene.cols), (2, 3));
        assert_eq!(scene.panels.len(), 6);
        let panel = scene.panel(1, 2).unwrap();
        assert_eq!(panel.strategy, Strategy::Dfs);
        assert_eq!(panel.family, GraphFamily::ScaleFree);
        assert_eq!(scene.graph_of(panel).unwrap().layout.len(), 12);
        assert_eq!(
            scene.frame_count,
            scene.panels.iter().map(|p| p.trace.len()).max().unwrap()
        );
    }

    #[test]
    fn final_state_is_held() {
        let scene = Scene::build(&small()).unwrap();
        let panel = &scene.panels[0];
        let (node, visited) = panel.state_at(scene.frame_count + 10).unwrap();
        assert_eq!(visited.len(), 12);
        assert_eq!(Some(node), panel.trace.frames().last().map(|f| f.node));
    }

    #[test]
    fn same_seed_same_scene() {
        assert_eq!(Scene::build(&small()).unwrap(), Scene::build(&small()).unwrap());
    }

    #[test]
    fn empty_rows_are_rejected() {
        let config = AnimationConfig {
            strategies: Vec::new(),
            ..small()
        };
        assert!(Scene::build(&config).is_err());
    }
}
